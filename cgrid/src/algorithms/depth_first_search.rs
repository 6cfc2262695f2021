use hashbrown::HashSet;
use log::{debug, trace};
use rand::{seq::SliceRandom as _, Rng};
use smallvec::SmallVec;

use super::flood;
use crate::{
    dims::Dims,
    grid::Grid,
    paint::{CellView, Paintable},
};

/// How the end cell ended up attached to the carved maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Carving itself reached the end, only happens when it's also the start.
    Visited,
    /// The end was joined to an already carved cell two steps away.
    Repaired { via: Dims },
    /// No repair was possible, but a corridor runs right next to the end.
    Touching,
    /// The end can't be reached from the start.
    Unreachable,
}

impl Connectivity {
    pub fn is_connected(&self) -> bool {
        !matches!(self, Connectivity::Unreachable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStep {
    Carved { from: Dims, to: Dims },
    Backtracked(Dims),
    Finished(Connectivity),
}

/// Randomized depth-first carving, one step per [`DfsCarver::advance`].
#[derive(Debug, Clone)]
pub struct DfsCarver {
    grid: Grid,
    stack: Vec<Dims>,
    visited: HashSet<Dims>,
    outcome: Option<Connectivity>,
}

impl DfsCarver {
    pub fn new(mut grid: Grid) -> Self {
        let (start, end) = (grid.start(), grid.end());
        grid.open(start);
        grid.open(end);

        let lattice = (grid.width() as usize / 2 + 1) * (grid.height() as usize / 2 + 1);
        let mut visited = HashSet::with_capacity(lattice);
        let mut stack = Vec::with_capacity(lattice);
        visited.insert(start);
        stack.push(start);

        Self {
            grid,
            stack,
            visited,
            outcome: None,
        }
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CarveStep {
        if let Some(outcome) = self.outcome {
            return CarveStep::Finished(outcome);
        }

        let Some(&current) = self.stack.last() else {
            let outcome = self.repair_end();
            debug!(
                "carved {}x{} maze, {} cells visited, end {:?}",
                self.grid.width(),
                self.grid.height(),
                self.visited.len(),
                outcome
            );
            self.outcome = Some(outcome);
            return CarveStep::Finished(outcome);
        };

        let unvisited = self
            .grid
            .neighbors_for_carving(current)
            .into_iter()
            .filter(|cell| !self.visited.contains(cell))
            .collect::<SmallVec<[_; 4]>>();

        match unvisited.choose(rng) {
            Some(&next) => {
                trace!("carve {:?} -> {:?}", current, next);
                self.grid.carve(current, next);
                self.visited.insert(next);
                self.stack.push(next);
                CarveStep::Carved {
                    from: current,
                    to: next,
                }
            }
            None => {
                self.stack.pop();
                CarveStep::Backtracked(current)
            }
        }
    }

    /// Advances until carving is done.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Connectivity {
        loop {
            if let CarveStep::Finished(outcome) = self.advance(rng) {
                return outcome;
            }
        }
    }

    fn repair_end(&mut self) -> Connectivity {
        let (start, end) = (self.grid.start(), self.grid.end());
        if self.visited.contains(&end) {
            return Connectivity::Visited;
        }

        for off in [Dims::UP, Dims::LEFT, Dims::DOWN, Dims::RIGHT] {
            let via = end + off * 2;
            if self.visited.contains(&via) && self.grid.is_carvable(end + off) {
                self.grid.carve(end, via);
                return Connectivity::Repaired { via };
            }
        }

        if flood::is_reachable(&self.grid, start, end) {
            Connectivity::Touching
        } else {
            Connectivity::Unreachable
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn current(&self) -> Option<Dims> {
        self.stack.last().copied()
    }

    pub fn outcome(&self) -> Option<Connectivity> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Paintable for DfsCarver {
    fn size(&self) -> Dims {
        self.grid.size()
    }

    fn cell_view(&self, pos: Dims) -> CellView {
        match self.grid.cell_view(pos) {
            view @ (CellView::Start | CellView::End) => view,
            _ if self.current() == Some(pos) => CellView::Current,
            _ if self.visited.contains(&pos) => CellView::Visited,
            view => view,
        }
    }
}
