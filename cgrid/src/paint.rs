use hashbrown::HashSet;

use crate::{dims::Dims, grid::Grid};

/// What a single cell should look like, regardless of how it ends up drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    Wall,
    Path,
    Frontier,
    Visited,
    Current,
    Solution,
    Start,
    End,
}

pub trait Paintable {
    fn size(&self) -> Dims;

    fn cell_view(&self, pos: Dims) -> CellView;
}

impl Paintable for Grid {
    fn size(&self) -> Dims {
        Grid::size(self)
    }

    fn cell_view(&self, pos: Dims) -> CellView {
        if pos == self.start() {
            CellView::Start
        } else if pos == self.end() {
            CellView::End
        } else if self.is_path(pos) {
            CellView::Path
        } else {
            CellView::Wall
        }
    }
}

/// Grid with its solution drawn over it.
pub struct Solved<'a> {
    grid: &'a Grid,
    path: HashSet<Dims>,
}

impl<'a> Solved<'a> {
    pub fn new(grid: &'a Grid, path: &[Dims]) -> Self {
        Self {
            grid,
            path: path.iter().copied().collect(),
        }
    }
}

impl Paintable for Solved<'_> {
    fn size(&self) -> Dims {
        self.grid.size()
    }

    fn cell_view(&self, pos: Dims) -> CellView {
        match self.grid.cell_view(pos) {
            CellView::Path if self.path.contains(&pos) => CellView::Solution,
            view => view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_views() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.remove_wall_between(Dims(1, 1), Dims(3, 1)).unwrap();

        assert_eq!(grid.cell_view(Dims(1, 1)), CellView::Start);
        assert_eq!(grid.cell_view(Dims(3, 3)), CellView::End);
        assert_eq!(grid.cell_view(Dims(2, 1)), CellView::Path);
        assert_eq!(grid.cell_view(Dims(0, 0)), CellView::Wall);
    }

    #[test]
    fn solution_overrides_path_only() {
        let mut grid = Grid::new(5, 3).unwrap();
        grid.remove_wall_between(Dims(1, 1), Dims(3, 1)).unwrap();
        let solved = Solved::new(&grid, &[Dims(1, 1), Dims(2, 1), Dims(3, 1)]);

        assert_eq!(solved.cell_view(Dims(1, 1)), CellView::Start);
        assert_eq!(solved.cell_view(Dims(2, 1)), CellView::Solution);
        assert_eq!(solved.cell_view(Dims(3, 1)), CellView::End);
        assert_eq!(solved.cell_view(Dims(2, 0)), CellView::Wall);
    }
}
