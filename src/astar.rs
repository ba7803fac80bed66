//! A* over the grid's cached 4-neighbourhood with uniform edge cost and a Manhattan heuristic.
//! Frontier ties on the estimated cost are broken by insertion order, so a given grid always
//! produces the same expansion order and the same path.
use crate::grid::Grid;
use crate::{StepControl, EDGE_COST, N_SMALLVEC_SIZE};
use grid_util::point::Point;
use log::{debug, info, warn};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const NO_PARENT: usize = usize::MAX;
const UNVISITED: u32 = u32::MAX;

/// What the search reports to its observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStep {
    /// All neighbours of this cell have been examined.
    Expanded(usize),
    /// This cell was marked as part of the route.
    PathMarked(usize),
}

/// Outcome of [PathFinder::find_path].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// The route from start to end, both included.
    Found { path: Vec<Point> },
    /// The frontier ran dry: start and end are not connected.
    NoPath,
    /// The observer asked to stop before the search finished.
    Cancelled,
}

impl PathResult {
    pub fn success(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }
    /// Number of steps on the route, zero when there is none.
    pub fn len(&self) -> usize {
        match self {
            PathResult::Found { path } => path.len().saturating_sub(1),
            _ => 0,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Found { path } => Some(path),
            _ => None,
        }
    }
}

struct SmallestCostHolder {
    estimated_cost: u32,
    seq: usize,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.seq == other.seq
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse both keys so the smallest estimate, and among equal
        // estimates the earliest insertion, comes out first.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// Per-run bookkeeping, indexed by cell id. Dropped when the run ends.
struct SearchContext {
    open_set: BinaryHeap<SmallestCostHolder>,
    enqueued: Vec<bool>,
    came_from: Vec<usize>,
    g_score: Vec<u32>,
    f_score: Vec<u32>,
    count: usize,
}

impl SearchContext {
    fn new(len: usize) -> SearchContext {
        SearchContext {
            open_set: BinaryHeap::new(),
            enqueued: vec![false; len],
            came_from: vec![NO_PARENT; len],
            g_score: vec![UNVISITED; len],
            f_score: vec![UNVISITED; len],
            count: 0,
        }
    }

    fn push(&mut self, index: usize) {
        self.open_set.push(SmallestCostHolder {
            estimated_cost: self.f_score[index],
            seq: self.count,
            index,
        });
        self.count += 1;
        self.enqueued[index] = true;
    }

    fn pop(&mut self) -> Option<usize> {
        let SmallestCostHolder { index, .. } = self.open_set.pop()?;
        self.enqueued[index] = false;
        Some(index)
    }

    /// Cells strictly between start and `end`, walking back from `end`.
    fn intermediate_cells(&self, start: usize, end: usize) -> Vec<usize> {
        itertools::unfold(self.came_from[end], |i| {
            let current = *i;
            (current != NO_PARENT && current != start).then(|| {
                *i = self.came_from[current];
                current
            })
        })
        .collect()
    }
}

/// A* engine. Holds no state between runs.
#[derive(Clone, Debug)]
pub struct PathFinder {
    /// Recompute every neighbour cache before searching. With `false` the caller must have
    /// called [Grid::update_neighbours] after the last barrier change.
    pub refresh_neighbours: bool,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder::new()
    }
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder {
            refresh_neighbours: true,
        }
    }

    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), admissible and
    /// consistent on a 4-connected uniform-cost grid.
    pub fn heuristic(p1: &Point, p2: &Point) -> u32 {
        p1.manhattan_distance(p2) as u32 * EDGE_COST
    }

    /// Searches from cell `start` to cell `end`, marking frontier cells
    /// [Open](crate::CellState::Open), expanded cells [Closed](crate::CellState::Closed) and
    /// the final route [Path](crate::CellState::Path). The endpoints keep their own states.
    ///
    /// `on_step` runs once per expanded cell and once per marked route cell; returning
    /// [StepControl::Stop] ends the run with [PathResult::Cancelled]. Markers left by an earlier
    /// run should be removed with [Grid::clear_search_marks] first.
    pub fn find_path<F>(
        &self,
        grid: &mut Grid,
        start: usize,
        end: usize,
        mut on_step: F,
    ) -> Result<PathResult, crate::GridError>
    where
        F: FnMut(&Grid, SearchStep) -> StepControl,
    {
        grid.check_id(start)?;
        grid.check_id(end)?;
        if start == end {
            let p = grid.point(start);
            return Err(crate::GridError::StartEqualsEnd {
                row: p.x as usize,
                col: p.y as usize,
            });
        }
        if self.refresh_neighbours {
            grid.update_neighbours();
        }
        let goal = grid.point(end);
        info!("Searching from {} to {}", grid.point(start), goal);

        let mut ct = SearchContext::new(grid.len());
        ct.g_score[start] = 0;
        ct.f_score[start] = Self::heuristic(&grid.point(start), &goal);
        ct.push(start);

        while let Some(current) = ct.pop() {
            if current == end {
                let mut cells = ct.intermediate_cells(start, end);
                for &ix in &cells {
                    grid.cells_mut()[ix].make_path();
                    if on_step(grid, SearchStep::PathMarked(ix)) == StepControl::Stop {
                        debug!("Search cancelled while marking the path");
                        return Ok(PathResult::Cancelled);
                    }
                }
                cells.reverse();
                let path = std::iter::once(start)
                    .chain(cells)
                    .chain(std::iter::once(end))
                    .map(|ix| grid.point(ix))
                    .collect::<Vec<Point>>();
                info!(
                    "Found path of length {} after {} insertions",
                    path.len() - 1,
                    ct.count
                );
                return Ok(PathResult::Found { path });
            }

            let tentative_g = ct.g_score[current] + EDGE_COST;
            let neighbours: SmallVec<[usize; N_SMALLVEC_SIZE]> =
                SmallVec::from_slice(grid.cells()[current].neighbours());
            for neighbour in neighbours {
                if tentative_g < ct.g_score[neighbour] {
                    ct.came_from[neighbour] = current;
                    ct.g_score[neighbour] = tentative_g;
                    ct.f_score[neighbour] =
                        tentative_g + Self::heuristic(&grid.point(neighbour), &goal);
                    if !ct.enqueued[neighbour] {
                        ct.push(neighbour);
                        if neighbour != end && neighbour != start {
                            grid.cells_mut()[neighbour].make_open();
                        }
                    }
                }
            }

            if on_step(grid, SearchStep::Expanded(current)) == StepControl::Stop {
                debug!("Search cancelled after expanding {}", grid.point(current));
                return Ok(PathResult::Cancelled);
            }

            if current != start {
                grid.cells_mut()[current].make_closed();
            }
        }
        warn!("Frontier exhausted, {} is not reachable", goal);
        Ok(PathResult::NoPath)
    }
}
