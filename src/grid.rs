use crate::cell::{Cell, CellState};
use crate::error::GridError;
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Square, row-major arena of [Cell]s. Cells are addressed by their dense id
/// `row * rows + col`, which is what the search and maze code key their state on.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a `rows` x `rows` grid of [Empty](CellState::Empty) cells. Zero rows, or more
    /// rows than an `i32` coordinate or the cell count can hold, are rejected.
    pub fn build(rows: usize) -> Result<Grid, GridError> {
        let len = rows
            .checked_mul(rows)
            .filter(|&len| len > 0 && i32::try_from(rows).is_ok())
            .ok_or(GridError::InvalidRows { rows })?;
        let cells = (0..len)
            .map(|ix| Cell::new(ix / rows, ix % rows))
            .collect::<Vec<Cell>>();
        Ok(Grid { rows, cells })
    }

    /// Parses rows of [CellState::symbol] characters, e.g. `["S.#", "...", "#.E"]`.
    pub fn from_ascii(lines: &[&str]) -> Result<Grid, GridError> {
        let mut grid = Grid::build(lines.len()).map_err(|_| GridError::InvalidLayout {
            reason: "no rows given".to_owned(),
        })?;
        for (row, line) in lines.iter().enumerate() {
            let symbols = line.chars().collect::<Vec<char>>();
            if symbols.len() != grid.rows {
                return Err(GridError::InvalidLayout {
                    reason: format!(
                        "row {row} has {} cells, expected {}",
                        symbols.len(),
                        grid.rows
                    ),
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let state =
                    CellState::from_symbol(symbol).ok_or_else(|| GridError::InvalidLayout {
                        reason: format!("unknown cell symbol {symbol:?} at ({row}, {col})"),
                    })?;
                grid.cells[row * grid.rows + col].set_state(state);
            }
        }
        Ok(grid)
    }

    /// Rebuilds the grid with the same row count. Every state and neighbour cache is dropped.
    pub fn reset(&mut self) {
        self.cells = (0..self.cells.len())
            .map(|ix| Cell::new(ix / self.rows, ix % self.rows))
            .collect();
    }

    /// Rebuilds the grid with a new row count.
    pub fn resize(&mut self, rows: usize) -> Result<(), GridError> {
        *self = Grid::build(rows)?;
        debug!("Rebuilt grid with {} rows", rows);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Number of cells, `rows * rows`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.rows
    }
    /// Id of the cell at `(row, col)`, if it lies inside the grid.
    pub fn id(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.rows).then(|| row * self.rows + col)
    }
    pub fn id_of_point(&self, point: Point) -> Option<usize> {
        self.in_bounds(point.x, point.y)
            .then(|| point.x as usize * self.rows + point.y as usize)
    }
    /// Like [id](Self::id) but reports the position in the error.
    pub fn checked_id(&self, row: usize, col: usize) -> Result<usize, GridError> {
        self.id(row, col).ok_or(GridError::OutOfBounds {
            row: row as i64,
            col: col as i64,
            rows: self.rows,
        })
    }
    pub(crate) fn check_id(&self, id: usize) -> Result<(), GridError> {
        if id < self.cells.len() {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row: (id / self.rows) as i64,
                col: (id % self.rows) as i64,
                rows: self.rows,
            })
        }
    }
    /// Position of cell `id`.
    ///
    /// # Panics
    ///
    /// If `id` is not below [len](Self::len). Use [cell](Self::cell) for a checked lookup.
    pub fn point(&self, id: usize) -> Point {
        self.cells[id].position()
    }

    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }
    pub fn cell_mut(&mut self, id: usize) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.id(row, col).map(|ix| &self.cells[ix])
    }
    pub fn cell_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.id(row, col).map(|ix| &mut self.cells[ix])
    }
    pub(crate) fn set_state_at_point(&mut self, point: Point, state: CellState) {
        if let Some(ix) = self.id_of_point(point) {
            self.cells[ix].set_state(state);
        }
    }

    /// First cell holding the given state, in row-major order.
    pub fn find_state(&self, state: CellState) -> Option<usize> {
        self.cells.iter().position(|c| c.state() == state)
    }

    /// Passable orthogonal neighbours of cell `id` in the order down, up, right, left. The order
    /// decides which of several equally good cells the search enqueues first.
    pub fn neighbors_of(&self, id: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        let point = self.point(id);
        [
            Point::new(point.x + 1, point.y),
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y + 1),
            Point::new(point.x, point.y - 1),
        ]
        .into_iter()
        .filter_map(|p| self.id_of_point(p))
        .filter(|&ix| !self.cells[ix].is_barrier())
        .collect()
    }

    /// Recomputes every cell's neighbour cache. Needed after any barrier change.
    pub fn update_neighbours(&mut self) {
        for ix in 0..self.cells.len() {
            let neighbours = self.neighbors_of(ix);
            self.cells[ix].neighbours = neighbours;
        }
    }

    /// Resets the [Open](CellState::Open), [Closed](CellState::Closed) and
    /// [Path](CellState::Path) markers of a previous search, keeping barriers and endpoints.
    pub fn clear_search_marks(&mut self) {
        self.cells
            .iter_mut()
            .filter(|c| c.state().is_search_mark())
            .for_each(Cell::reset);
    }

    /// Forces every cell into `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.iter_mut().for_each(|c| c.set_state(state));
    }

    /// Generates a [UnionFind] structure linking every pair of orthogonally adjacent
    /// non-barrier cells.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cells.len());
        for ix in 0..self.cells.len() {
            if self.cells[ix].is_barrier() {
                continue;
            }
            let point = self.point(ix);
            // Down and right suffice, the other two directions are covered by the neighbour.
            [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ]
            .into_iter()
            .filter_map(|p| self.id_of_point(p))
            .filter(|&n| !self.cells[n].is_barrier())
            .for_each(|n| {
                components.union(ix, n);
            });
        }
        components
    }

    /// Checks if `a` and `b` are joined through non-barrier cells.
    pub fn reachable(&self, a: usize, b: usize) -> bool {
        a < self.len()
            && b < self.len()
            && !self.cells[a].is_barrier()
            && !self.cells[b].is_barrier()
            && self.components().equiv(a, b)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows) {
            let line = row.iter().map(|c| c.state().symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
