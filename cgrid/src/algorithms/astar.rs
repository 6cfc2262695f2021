//! A* over the traversal adjacency of a carved grid.
//!
//! Every step costs 1 and the heuristic is the Manhattan distance to the end, which keeps the
//! returned path shortest. The open set uses lazy deletion: a cell may be pushed more than once
//! and the stale copies are skipped once the cell is closed.

use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::{HashMap, HashSet};
use log::{debug, trace, warn};

use crate::{
    dims::Dims,
    grid::Grid,
    paint::{CellView, Paintable},
};

/// Open set entry, ordered so that [`BinaryHeap`] pops the smallest `(f, g, pos)` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    pos: Dims,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.f, other.g, other.pos).cmp(&(self.f, self.g, self.pos))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// The cell was closed and its neighbors queued.
    Expanded(Dims),
    /// Popped a duplicate of an already closed cell.
    Stale(Dims),
    Found,
    Exhausted,
}

#[derive(Debug, Clone)]
enum Status {
    Searching,
    Found(Vec<Dims>),
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct AStar<'a> {
    grid: &'a Grid,
    start: Dims,
    end: Dims,
    open: BinaryHeap<OpenNode>,
    pending: HashMap<Dims, u32>,
    closed: HashSet<Dims>,
    came_from: HashMap<Dims, Dims>,
    current: Option<Dims>,
    status: Status,
}

impl<'a> AStar<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        let (start, end) = (grid.start(), grid.end());

        let mut search = Self {
            grid,
            start,
            end,
            open: BinaryHeap::new(),
            pending: HashMap::new(),
            closed: HashSet::new(),
            came_from: HashMap::new(),
            current: None,
            status: Status::Searching,
        };

        if grid.is_path(start) && grid.is_path(end) {
            search.open.push(OpenNode {
                f: start.manhattan(end),
                g: 0,
                pos: start,
            });
            search.pending.insert(start, 0);
        } else {
            warn!("start or end of the maze is a wall, nothing to solve");
            search.status = Status::Exhausted;
        }

        search
    }

    pub fn advance(&mut self) -> SearchStep {
        match self.status {
            Status::Found(_) => return SearchStep::Found,
            Status::Exhausted => return SearchStep::Exhausted,
            Status::Searching => {}
        }

        let Some(OpenNode { g, pos, .. }) = self.open.pop() else {
            debug!("no path, {} cells expanded", self.closed.len());
            self.status = Status::Exhausted;
            return SearchStep::Exhausted;
        };
        self.current = Some(pos);

        if pos == self.end {
            let path = self.reconstruct_path();
            debug!(
                "found path of {} cells, {} cells expanded",
                path.len(),
                self.closed.len()
            );
            self.status = Status::Found(path);
            return SearchStep::Found;
        }

        if !self.closed.insert(pos) {
            return SearchStep::Stale(pos);
        }
        trace!("expand {:?}, g = {}", pos, g);

        let tentative = g + 1;
        for next in self.grid.neighbors_for_traversal(pos) {
            if self.closed.contains(&next) {
                continue;
            }
            if self.pending.get(&next).is_some_and(|&best| best <= tentative) {
                continue;
            }

            self.pending.insert(next, tentative);
            self.came_from.insert(next, pos);
            self.open.push(OpenNode {
                f: tentative + next.manhattan(self.end),
                g: tentative,
                pos: next,
            });
        }

        SearchStep::Expanded(pos)
    }

    /// Advances until the end is found or the open set runs dry.
    pub fn run(&mut self) -> SearchStep {
        loop {
            match self.advance() {
                step @ (SearchStep::Found | SearchStep::Exhausted) => return step,
                _ => {}
            }
        }
    }

    fn reconstruct_path(&self) -> Vec<Dims> {
        let mut path = vec![self.end];
        let mut current = self.end;
        while current != self.start {
            match self.came_from.get(&current) {
                Some(&prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Found path, `None` while searching or when there's no path.
    pub fn path(&self) -> Option<&[Dims]> {
        match &self.status {
            Status::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Found path, or an empty one.
    pub fn into_path(self) -> Vec<Dims> {
        match self.status {
            Status::Found(path) => path,
            _ => Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.status, Status::Searching)
    }

    pub fn current(&self) -> Option<Dims> {
        self.current
    }

    /// Number of closed cells.
    pub fn expanded(&self) -> usize {
        self.closed.len()
    }
}

impl Paintable for AStar<'_> {
    fn size(&self) -> Dims {
        self.grid.size()
    }

    fn cell_view(&self, pos: Dims) -> CellView {
        let view = self.grid.cell_view(pos);
        if matches!(view, CellView::Start | CellView::End) {
            return view;
        }

        if let Some(path) = self.path() {
            return if path.contains(&pos) {
                CellView::Solution
            } else {
                view
            };
        }

        if self.current == Some(pos) {
            CellView::Current
        } else if self.closed.contains(&pos) {
            CellView::Visited
        } else if self.pending.contains_key(&pos) {
            CellView::Frontier
        } else {
            view
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::text;

    const FIRST_PICK_5X5: &str = "#####\n#   #\n# # #\n# # #\n#####\n";

    #[test]
    fn open_node_order() {
        let mut heap = BinaryHeap::new();
        for (f, g, pos) in [
            (5, 0, Dims(0, 0)),
            (4, 2, Dims(1, 3)),
            (4, 1, Dims(2, 1)),
            (4, 1, Dims(1, 2)),
        ] {
            heap.push(OpenNode { f, g, pos });
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|n| n.pos)).collect();
        assert_eq!(order, vec![Dims(1, 2), Dims(2, 1), Dims(1, 3), Dims(0, 0)]);
    }

    #[test]
    fn solves_first_pick_maze() {
        let grid = text::parse(FIRST_PICK_5X5).unwrap();
        let mut search = AStar::new(&grid);

        assert_eq!(search.advance(), SearchStep::Expanded(Dims(1, 1)));
        assert_eq!(search.run(), SearchStep::Found);
        assert_eq!(
            search.path().unwrap(),
            &[Dims(1, 1), Dims(2, 1), Dims(3, 1), Dims(3, 2), Dims(3, 3)]
        );
        assert_eq!(search.expanded(), 6);
        assert_eq!(search.advance(), SearchStep::Found);
    }

    #[test]
    fn ties_prefer_lower_coordinates() {
        let grid = text::parse("#####\n#   #\n#   #\n#   #\n#####\n").unwrap();
        let mut search = AStar::new(&grid);
        search.run();

        assert_eq!(
            search.into_path(),
            vec![Dims(1, 1), Dims(1, 2), Dims(1, 3), Dims(2, 3), Dims(3, 3)]
        );
    }

    #[test]
    fn single_cell_path() {
        let grid = text::parse("###\n# #\n###\n").unwrap();
        let mut search = AStar::new(&grid);

        assert_eq!(search.advance(), SearchStep::Found);
        assert_eq!(search.path(), Some(&[Dims(1, 1)][..]));
        assert_eq!(search.expanded(), 0);
    }

    #[test]
    fn no_path() {
        let grid = text::parse("#####\n# # #\n#####\n").unwrap();
        let mut search = AStar::new(&grid);

        assert_eq!(search.advance(), SearchStep::Expanded(Dims(1, 1)));
        assert_eq!(search.advance(), SearchStep::Exhausted);
        assert_eq!(search.path(), None);
        assert!(search.is_finished());
        assert!(search.into_path().is_empty());
    }

    #[test]
    fn walled_start() {
        let grid = text::parse("#####\n## ##\n#   #\n#   #\n#####\n").unwrap();
        let mut search = AStar::new(&grid);

        assert!(search.is_finished());
        assert_eq!(search.advance(), SearchStep::Exhausted);
    }

    #[test]
    fn views_while_solving() {
        let grid = text::parse(FIRST_PICK_5X5).unwrap();
        let mut search = AStar::new(&grid);
        search.advance();
        search.advance();

        assert_eq!(search.cell_view(Dims(1, 1)), CellView::Start);
        assert_eq!(search.cell_view(Dims(1, 2)), CellView::Current);
        assert_eq!(search.cell_view(Dims(2, 1)), CellView::Frontier);
        assert_eq!(search.cell_view(Dims(1, 3)), CellView::Frontier);
        assert_eq!(search.cell_view(Dims(3, 1)), CellView::Path);

        search.advance();
        assert_eq!(search.cell_view(Dims(1, 2)), CellView::Visited);

        search.run();
        assert_eq!(search.cell_view(Dims(2, 1)), CellView::Solution);
        assert_eq!(search.cell_view(Dims(1, 2)), CellView::Path);
        assert_eq!(search.cell_view(Dims(3, 3)), CellView::End);
    }
}
