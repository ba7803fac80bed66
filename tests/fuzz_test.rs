/// Fuzzes the pathfinder by checking for many random grids that a path is found exactly when the
/// end is reachable by being part of the same connected component, and that found paths are
/// valid and no longer than needed.
use maze_pathfinding::{CellState, Grid, PathFinder, PathResult, Point, StepControl};
use rand::prelude::*;

fn random_grid(n: usize, rng: &mut StdRng, density: f64) -> Grid {
    let mut grid = Grid::build(n).unwrap();
    for ix in 0..grid.len() {
        if rng.gen_bool(density) {
            grid.cell_mut(ix).unwrap().make_barrier();
        }
    }
    grid
}

fn visualize_grid(grid: &Grid) {
    print!("{}", grid);
}

fn run(grid: &mut Grid, start: usize, end: usize) -> PathResult {
    PathFinder::new()
        .find_path(grid, start, end, |_, _| StepControl::Continue)
        .unwrap()
}

fn assert_walkable(grid: &Grid, path: &[Point]) {
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
    }
    for p in path {
        let cell = grid.cell_at(p.x as usize, p.y as usize).unwrap();
        assert!(!cell.is_barrier());
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng, 0.4);
        let start = 0;
        let end = grid.len() - 1;
        grid.cell_mut(start).unwrap().make_start();
        grid.cell_mut(end).unwrap().make_end();
        let reachable = grid.reachable(start, end);
        let result = run(&mut grid, start, end);
        // Show the grid if the outcome disagrees with the components
        if result.success() != reachable {
            visualize_grid(&grid);
        }
        assert_eq!(result.success(), reachable);
        match result {
            PathResult::Found { path } => {
                assert_walkable(&grid, &path);
                assert!(path.len() - 1 >= 2 * (N - 1));
            }
            other => assert_eq!(other, PathResult::NoPath),
        }
    }
}

/// On a grid without barriers every path is as long as the Manhattan distance.
#[test]
fn fuzz_distance_open_grid() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(1);
    let mut grid = Grid::build(N).unwrap();
    for _ in 0..500 {
        let start = rng.gen_range(0..grid.len());
        let end = rng.gen_range(0..grid.len());
        if start == end {
            continue;
        }
        grid.reset();
        let result = run(&mut grid, start, end);
        let expected = grid.point(start).manhattan_distance(&grid.point(end)) as usize;
        assert_eq!(result.len(), expected);
    }
}

/// Compares against a breadth-first search on sparse random grids, which is optimal for
/// uniform edge costs.
#[test]
fn fuzz_distance_matches_bfs() {
    const N: usize = 8;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..1000 {
        let mut grid = random_grid(N, &mut rng, 0.25);
        let start = rng.gen_range(0..grid.len());
        let end = rng.gen_range(0..grid.len());
        if start == end
            || grid.cell(start).unwrap().is_barrier()
            || grid.cell(end).unwrap().is_barrier()
        {
            continue;
        }
        let expected = bfs_distance(&grid, start, end);
        let result = run(&mut grid, start, end);
        assert_eq!(result.path().map(|p| p.len() - 1), expected);
    }
}

fn bfs_distance(grid: &Grid, start: usize, end: usize) -> Option<usize> {
    let mut distance = vec![usize::MAX; grid.len()];
    let mut queue = std::collections::VecDeque::from([start]);
    distance[start] = 0;
    while let Some(ix) = queue.pop_front() {
        if ix == end {
            return Some(distance[ix]);
        }
        for n in grid.neighbors_of(ix) {
            if distance[n] == usize::MAX {
                distance[n] = distance[ix] + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

/// Same grid, same endpoints, same path after clearing the marks.
#[test]
fn repeated_runs_agree() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let mut grid = random_grid(9, &mut rng, 0.3);
        grid.cell_mut(0).unwrap().set_state(CellState::Start);
        grid.cell_mut(80).unwrap().set_state(CellState::End);
        let first = run(&mut grid, 0, 80);
        grid.clear_search_marks();
        let second = run(&mut grid, 0, 80);
        assert_eq!(first, second);
    }
}
