//! Randomized backtracking maze carving. Starting from a fully blocked grid, passages grow one
//! cell at a time from a stack of candidates. A candidate is only carved while it touches at
//! most one existing passage, which keeps the passage network a single tree.
use crate::cell::CellState;
use crate::grid::Grid;
use crate::{StepControl, N_SMALLVEC_SIZE, THROTTLE_DIVISOR};
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Orthogonal offsets in the order down, up, right, left.
const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn offset(p: Point, (dx, dy): (i32, i32)) -> Point {
    Point::new(p.x + dx, p.y + dy)
}

/// Result of a carve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Carved cells in the order they were carved.
    pub passages: Vec<Point>,
    /// Cell cleared diagonally below-right of the smallest passage once carving finished.
    pub entrance: Option<Point>,
    /// False if the observer stopped the carve early.
    pub complete: bool,
}

impl Maze {
    pub fn len(&self) -> usize {
        self.passages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Number of orthogonally adjacent passage pairs.
    pub fn edge_count(&self) -> usize {
        let carved = self.passages.iter().copied().collect::<FxHashSet<Point>>();
        self.passages
            .iter()
            .map(|&p| {
                [(1, 0), (0, 1)]
                    .into_iter()
                    .filter(|&d| carved.contains(&offset(p, d)))
                    .count()
            })
            .sum()
    }

    /// Checks whether every passage can reach every other through passages.
    pub fn is_connected(&self) -> bool {
        let index = self
            .passages
            .iter()
            .enumerate()
            .map(|(ix, &p)| (p, ix))
            .collect::<FxHashMap<Point, usize>>();
        let mut components = UnionFind::new(self.passages.len());
        for (ix, &p) in self.passages.iter().enumerate() {
            for d in [(1, 0), (0, 1)] {
                if let Some(&n) = index.get(&offset(p, d)) {
                    components.union(ix, n);
                }
            }
        }
        (1..self.passages.len()).all(|ix| components.equiv(0, ix))
    }
}

/// Bookkeeping for one carve.
struct CarveState {
    /// Carvable cells are those with both coordinates in `0..interior`.
    interior: i32,
    passages: FxIndexSet<Point>,
    /// Used as a stack, the last entry is the most recent candidate.
    candidates: FxIndexSet<Point>,
    impossible: FxHashSet<Point>,
}

impl CarveState {
    fn new(interior: i32) -> CarveState {
        CarveState {
            interior,
            passages: FxIndexSet::default(),
            candidates: FxIndexSet::default(),
            impossible: FxHashSet::default(),
        }
    }

    fn carved(&self, p: Point) -> bool {
        self.passages.contains(&p)
    }

    fn in_interior(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.interior && p.y < self.interior
    }

    /// At most one orthogonal neighbour is already a passage.
    fn one_connection(&self, p: Point) -> bool {
        ORTHOGONAL
            .iter()
            .filter(|&&d| self.carved(offset(p, d)))
            .count()
            <= 1
    }

    /// A carved diagonal neighbour with neither of the two cells between them carved.
    fn diagonal_shortcut(&self, p: Point) -> bool {
        DIAGONAL.iter().any(|&(dx, dy)| {
            self.carved(offset(p, (dx, dy)))
                && !self.carved(offset(p, (dx, 0)))
                && !self.carved(offset(p, (0, dy)))
        })
    }

    /// Whether `p` may be carved now. Rejections other than "already carved" are remembered and
    /// make every later check of `p` fail too.
    fn valid(&mut self, p: Point) -> bool {
        if self.candidates.contains(&p) {
            self.impossible.insert(p);
            false
        } else if self.impossible.contains(&p) {
            false
        } else if !self.in_interior(p) || !self.one_connection(p) || self.diagonal_shortcut(p) {
            self.impossible.insert(p);
            false
        } else {
            !self.carved(p)
        }
    }
}

/// Carves a loop-free, connected passage network into a blocked [Grid].
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    /// Act on each scanned candidate only with probability `1 / (1 + passages / throttle_divisor)`
    /// so growth slows down as the maze fills. Only useful when animating.
    pub paced: bool,
    pub throttle_divisor: usize,
    rng: StdRng,
}

impl Default for MazeGenerator {
    fn default() -> MazeGenerator {
        MazeGenerator::new()
    }
}

impl MazeGenerator {
    pub fn new() -> MazeGenerator {
        MazeGenerator::with_rng(StdRng::from_entropy())
    }
    /// A generator that produces the same mazes for the same seed.
    pub fn seeded(seed: u64) -> MazeGenerator {
        MazeGenerator::with_rng(StdRng::seed_from_u64(seed))
    }
    fn with_rng(rng: StdRng) -> MazeGenerator {
        MazeGenerator {
            paced: false,
            throttle_divisor: THROTTLE_DIVISOR,
            rng,
        }
    }

    pub fn carve(&mut self, grid: &mut Grid) -> Maze {
        self.carve_with(grid, |_, _| StepControl::Continue)
    }

    /// Blocks the whole grid, then carves passages into it. `on_step` runs after every carved
    /// cell; [StepControl::Stop] ends the carve with an incomplete [Maze] and no entrance.
    pub fn carve_with<F>(&mut self, grid: &mut Grid, mut on_step: F) -> Maze
    where
        F: FnMut(&Grid, Point) -> StepControl,
    {
        grid.fill(CellState::Barrier);
        // The last row and column are never carved.
        let interior = grid.rows() as i32 - 1;
        let mut state = CarveState::new(interior);
        if interior > 0 {
            let start = Point::new(
                self.rng.gen_range(0..interior),
                self.rng.gen_range(0..interior),
            );
            debug!("Carving maze from {}", start);
            state.candidates.insert(start);
        }

        while !state.candidates.is_empty() {
            let Some(candidate) = self.next_candidate(&mut state) else {
                continue;
            };
            if !state.valid(candidate) {
                continue;
            }
            grid.set_state_at_point(candidate, CellState::Empty);
            state.passages.insert(candidate);

            let mut branches = ORTHOGONAL
                .iter()
                .map(|&d| offset(candidate, d))
                .filter(|&p| state.valid(p))
                .collect::<SmallVec<[Point; N_SMALLVEC_SIZE]>>();
            branches.shuffle(&mut self.rng);
            state.candidates.extend(branches);

            if on_step(grid, candidate) == StepControl::Stop {
                debug!("Maze carving stopped after {} passages", state.passages.len());
                return Maze {
                    passages: state.passages.into_iter().collect(),
                    entrance: None,
                    complete: false,
                };
            }
        }

        let passages = state.passages.into_iter().collect::<Vec<Point>>();
        let entrance = passages
            .iter()
            .min_by_key(|p| (p.x, p.y))
            .map(|p| offset(*p, (1, 1)));
        if let Some(entrance) = entrance {
            grid.set_state_at_point(entrance, CellState::Empty);
        }
        info!("Carved maze with {} passages", passages.len());
        Maze {
            passages,
            entrance,
            complete: true,
        }
    }

    /// Takes the next candidate off the stack. When paced, the stack is scanned from the top and
    /// each entry is taken with the throttle probability; a scan without a hit yields nothing.
    fn next_candidate(&mut self, state: &mut CarveState) -> Option<Point> {
        if !self.paced {
            return state.candidates.pop();
        }
        let odds = state.passages.len() / self.throttle_divisor.max(1);
        for ix in (0..state.candidates.len()).rev() {
            if self.rng.gen_range(0..=odds) == 0 {
                return state.candidates.shift_remove_index(ix);
            }
        }
        None
    }
}
