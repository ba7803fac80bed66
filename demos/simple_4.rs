use maze_pathfinding::{Grid, PathFinder, SearchStep, StepControl};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::from_ascii(&["S..", ".#.", "..E"]).unwrap();
    println!("{}", grid);
    let start = grid.id(0, 0).unwrap();
    let end = grid.id(2, 2).unwrap();
    let result = PathFinder::new()
        .find_path(&mut grid, start, end, |grid, step| {
            if let SearchStep::Expanded(ix) = step {
                println!("Expanded {}:\n{}", grid.point(ix), grid);
            }
            StepControl::Continue
        })
        .unwrap();
    println!("Path:");
    for p in result.path().unwrap() {
        println!("{:?}", p);
    }
    println!("{}", grid);
}
