use maze_pathfinding::{Grid, MazeGenerator, PathFinder, StepControl};

// Carves a maze into a 21x21 grid from a fixed seed, then solves it between the first and the
// last carved passage.

fn main() {
    let mut grid = Grid::build(21).unwrap();
    let maze = MazeGenerator::seeded(2024).carve(&mut grid);
    println!(
        "Carved {} passages with {} connections",
        maze.len(),
        maze.edge_count()
    );
    println!("{}", grid);

    let start = grid.id_of_point(maze.passages[0]).unwrap();
    let end = grid.id_of_point(*maze.passages.last().unwrap()).unwrap();
    grid.cell_mut(start).unwrap().make_start();
    grid.cell_mut(end).unwrap().make_end();
    let result = PathFinder::new()
        .find_path(&mut grid, start, end, |_, _| StepControl::Continue)
        .unwrap();
    match result.path() {
        Some(path) => println!("Solved in {} steps", path.len() - 1),
        None => println!("No route found"),
    }
    println!("{}", grid);
}
