//! Display-free driver holding a grid together with its designated endpoints. It applies the
//! interaction rules of the interactive visualiser (click to place start, end, then barriers)
//! on grid coordinates, so a front end only has to translate its input events.
use crate::astar::{PathFinder, PathResult, SearchStep};
use crate::error::GridError;
use crate::grid::Grid;
use crate::maze::{Maze, MazeGenerator};
use crate::StepControl;
use grid_util::point::Point;
use log::info;

/// A grid plus its start and end cells. Both endpoints are tracked by id so that at most one
/// start and one end exist at any time.
#[derive(Clone, Debug)]
pub struct Editor {
    grid: Grid,
    start: Option<usize>,
    end: Option<usize>,
    pub path_finder: PathFinder,
    pub maze_generator: MazeGenerator,
}

impl Editor {
    pub fn new(rows: usize) -> Result<Editor, GridError> {
        Ok(Editor {
            grid: Grid::build(rows)?,
            start: None,
            end: None,
            path_finder: PathFinder::new(),
            maze_generator: MazeGenerator::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> Option<Point> {
        self.start.map(|ix| self.grid.point(ix))
    }
    pub fn end(&self) -> Option<Point> {
        self.end.map(|ix| self.grid.point(ix))
    }

    /// Primary action on a cell: the first free endpoint slot is filled, any other cell becomes
    /// a barrier. Selecting an existing endpoint does nothing.
    pub fn select(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let ix = self.grid.checked_id(row, col)?;
        let cell = &mut self.grid.cells_mut()[ix];
        if self.start.is_none() && self.end != Some(ix) {
            self.start = Some(ix);
            cell.make_start();
        } else if self.end.is_none() && self.start != Some(ix) {
            self.end = Some(ix);
            cell.make_end();
        } else if self.start != Some(ix) && self.end != Some(ix) {
            cell.make_barrier();
        }
        Ok(())
    }

    /// Secondary action on a cell: it becomes empty and stops being an endpoint.
    pub fn erase(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let ix = self.grid.checked_id(row, col)?;
        self.grid.cells_mut()[ix].reset();
        if self.start == Some(ix) {
            self.start = None;
        } else if self.end == Some(ix) {
            self.end = None;
        }
        Ok(())
    }

    /// Empties the grid and forgets both endpoints.
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
        self.grid.reset();
    }

    pub fn grow(&mut self) -> Result<(), GridError> {
        self.resize(self.grid.rows() + 1)
    }

    /// One row fewer; a single-row grid is rejected and left untouched.
    pub fn shrink(&mut self) -> Result<(), GridError> {
        self.resize(self.grid.rows() - 1)
    }

    fn resize(&mut self, rows: usize) -> Result<(), GridError> {
        self.grid.resize(rows)?;
        self.start = None;
        self.end = None;
        info!("Grid resized to {} rows", rows);
        Ok(())
    }

    /// Clears the marks of the previous search and runs A* between the endpoints.
    pub fn solve<F>(&mut self, on_step: F) -> Result<PathResult, GridError>
    where
        F: FnMut(&Grid, SearchStep) -> StepControl,
    {
        let start = self.start.ok_or(GridError::MissingEndpoint { which: "start" })?;
        let end = self.end.ok_or(GridError::MissingEndpoint { which: "end" })?;
        self.grid.clear_search_marks();
        self.path_finder
            .find_path(&mut self.grid, start, end, on_step)
    }

    /// Replaces the grid content with a freshly carved maze. Endpoints are forgotten.
    pub fn generate_maze<F>(&mut self, on_step: F) -> Maze
    where
        F: FnMut(&Grid, Point) -> StepControl,
    {
        self.clear();
        self.maze_generator.carve_with(&mut self.grid, on_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellState;

    fn proceed<T>(_: &Grid, _: T) -> StepControl {
        StepControl::Continue
    }

    #[test]
    fn placement_order() {
        let mut editor = Editor::new(3).unwrap();
        editor.select(0, 0).unwrap();
        editor.select(0, 0).unwrap();
        editor.select(2, 2).unwrap();
        editor.select(1, 1).unwrap();
        editor.select(2, 2).unwrap();
        assert_eq!(editor.start(), Some(Point::new(0, 0)));
        assert_eq!(editor.end(), Some(Point::new(2, 2)));
        assert_eq!(editor.grid().to_string(), "S..\n.#.\n..E\n");
    }

    #[test]
    fn erasing_the_start_frees_the_slot() {
        let mut editor = Editor::new(3).unwrap();
        editor.select(0, 0).unwrap();
        editor.select(2, 2).unwrap();
        editor.erase(0, 0).unwrap();
        assert_eq!(editor.start(), None);
        editor.select(1, 0).unwrap();
        assert_eq!(editor.start(), Some(Point::new(1, 0)));
        assert_eq!(editor.end(), Some(Point::new(2, 2)));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut editor = Editor::new(3).unwrap();
        assert!(matches!(
            editor.select(3, 0),
            Err(GridError::OutOfBounds { row: 3, col: 0, rows: 3 })
        ));
    }

    #[test]
    fn solve_needs_both_endpoints() {
        let mut editor = Editor::new(3).unwrap();
        editor.select(0, 0).unwrap();
        assert_eq!(
            editor.solve(proceed),
            Err(GridError::MissingEndpoint { which: "end" })
        );
    }

    /// Solving twice gives the same route because the first run's marks are cleared.
    #[test]
    fn solve_is_repeatable() {
        let mut editor = Editor::new(5).unwrap();
        editor.select(0, 0).unwrap();
        editor.select(4, 4).unwrap();
        editor.select(2, 2).unwrap();
        let first = editor.solve(proceed).unwrap();
        let second = editor.solve(proceed).unwrap();
        assert_eq!(first.len(), 8);
        assert_eq!(first, second);
        assert!(editor.grid().cell_at(0, 0).unwrap().is_start());
        assert!(editor.grid().cell_at(4, 4).unwrap().is_end());
    }

    /// The end cell survives repeated solves on a grid where it is reached directly.
    #[test]
    fn end_stays_visible_across_solves() {
        let mut editor = Editor::new(3).unwrap();
        editor.select(0, 0).unwrap();
        editor.select(2, 2).unwrap();
        for _ in 0..2 {
            assert_eq!(editor.solve(proceed).unwrap().len(), 4);
            assert!(editor.grid().cell_at(2, 2).unwrap().is_end());
            assert_eq!(editor.end(), Some(Point::new(2, 2)));
        }
    }

    #[test]
    fn resizing_forgets_endpoints() {
        let mut editor = Editor::new(2).unwrap();
        editor.select(0, 0).unwrap();
        editor.grow().unwrap();
        assert_eq!(editor.grid().rows(), 3);
        assert_eq!(editor.start(), None);
        editor.shrink().unwrap();
        editor.shrink().unwrap();
        assert_eq!(
            editor.shrink(),
            Err(GridError::InvalidRows { rows: 0 })
        );
        assert_eq!(editor.grid().rows(), 1);
    }

    #[test]
    fn maze_replaces_grid() {
        let mut editor = Editor::new(8).unwrap();
        editor.maze_generator = MazeGenerator::seeded(11);
        editor.select(0, 0).unwrap();
        let maze = editor.generate_maze(proceed);
        assert!(maze.complete);
        assert_eq!(editor.start(), None);
        assert!(editor
            .grid()
            .cells()
            .iter()
            .all(|c| matches!(c.state(), CellState::Empty | CellState::Barrier)));
    }
}
