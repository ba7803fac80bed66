use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// Semantic state of a single grid position. Only [Barrier](CellState::Barrier) affects
/// adjacency; the other states are markers for the driver and the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Enqueued on the search frontier.
    Open,
    /// Fully expanded by the search.
    Closed,
    /// Part of the reconstructed route.
    Path,
}

impl CellState {
    /// Character used by the grid's text rendering.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Path => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellState> {
        match symbol {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Barrier),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            'o' => Some(CellState::Open),
            'x' => Some(CellState::Closed),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }

    /// True for the markers a search run leaves behind.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }
}

/// A single grid position. The position is fixed when the [Grid](crate::Grid) is built, the
/// state changes freely. Neighbours are cached as dense cell ids and only refreshed through
/// [Grid::update_neighbours](crate::Grid::update_neighbours).
#[derive(Clone, Debug)]
pub struct Cell {
    position: Point,
    state: CellState,
    pub(crate) neighbours: SmallVec<[usize; N_SMALLVEC_SIZE]>,
}

impl Cell {
    /// Callers guarantee both coordinates fit an `i32`, see [Grid::build](crate::Grid::build).
    pub(crate) fn new(row: usize, col: usize) -> Cell {
        Cell {
            position: Point::new(row as i32, col as i32),
            state: CellState::Empty,
            neighbours: SmallVec::new(),
        }
    }
    pub fn row(&self) -> usize {
        self.position.x as usize
    }
    pub fn col(&self) -> usize {
        self.position.y as usize
    }
    /// Position as a [Point] with `x` the row and `y` the column.
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    /// Cached ids of the passable orthogonal neighbours, possibly stale.
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }
    pub fn is_open(&self) -> bool {
        self.state == CellState::Open
    }
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }
    pub fn make_start(&mut self) {
        self.state = CellState::Start;
    }
    pub fn make_end(&mut self) {
        self.state = CellState::End;
    }
    pub fn make_barrier(&mut self) {
        self.state = CellState::Barrier;
    }
    pub fn make_open(&mut self) {
        self.state = CellState::Open;
    }
    pub fn make_closed(&mut self) {
        self.state = CellState::Closed;
    }
    pub fn make_path(&mut self) {
        self.state = CellState::Path;
    }
}
