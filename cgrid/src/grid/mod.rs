pub mod mask;
pub mod text;

pub use mask::CellMask;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

/// Smallest allowed width and height of a grid.
pub const MIN_SIZE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Path,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid maze size {width}x{height}, both dimensions must be at least 3")]
    InvalidSize { width: i32, height: i32 },
    #[error("position {0:?} is out of bounds")]
    OutOfBounds(Dims),
    #[error("cells {0:?} and {1:?} are not two steps apart along one axis")]
    NotTwoApart(Dims, Dims),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Wall/path grid the carver mutates and the solver walks.
///
/// Cells on odd coordinates form the carving lattice: the carver only ever jumps two cells at a
/// time, so the cell in between becomes the corridor and every other cell stays a wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    tiles: Array2D<Tile>,
    mask: CellMask,
}

#[derive(Deserialize)]
struct GridData {
    tiles: Array2D<Tile>,
    mask: CellMask,
}

impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let size = data.tiles.size();
        Self::check_size(size)?;
        Self::check_buffer(size, data.tiles.len())?;

        let mask_size = data.mask.size();
        if mask_size != size {
            return Err(GridError::InvalidSize {
                width: mask_size.0,
                height: mask_size.1,
            });
        }
        Self::check_buffer(size, data.mask.cell_count())?;

        Ok(Grid {
            tiles: data.tiles,
            mask: data.mask,
        })
    }
}

impl Grid {
    /// Creates a grid full of walls, every cell carvable.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::check_size(Dims(width, height))?;
        Self::with_mask(CellMask::new(width as usize, height as usize))
    }

    /// Creates a grid full of walls, with the size of the mask.
    pub fn with_mask(mask: CellMask) -> Result<Self, GridError> {
        let size = mask.size();
        Self::check_size(size)?;

        let tiles = Array2D::new(Tile::Wall, size.0 as usize, size.1 as usize);
        Ok(Grid { tiles, mask })
    }

    pub(crate) fn from_tiles(tiles: Array2D<Tile>) -> Result<Self, GridError> {
        let size = tiles.size();
        Self::check_size(size)?;

        Ok(Grid {
            tiles,
            mask: CellMask::new(size.0 as usize, size.1 as usize),
        })
    }

    fn check_size(size: Dims) -> Result<(), GridError> {
        if size.0 < MIN_SIZE || size.1 < MIN_SIZE {
            return Err(GridError::InvalidSize {
                width: size.0,
                height: size.1,
            });
        }
        Ok(())
    }

    /// Deserialized buffers carry their size separately from their contents.
    fn check_buffer(size: Dims, len: usize) -> Result<(), GridError> {
        if (size.0 as usize).checked_mul(size.1 as usize) != Some(len) {
            return Err(GridError::InvalidSize {
                width: size.0,
                height: size.1,
            });
        }
        Ok(())
    }

    pub fn size(&self) -> Dims {
        self.tiles.size()
    }

    pub fn width(&self) -> i32 {
        self.size().0
    }

    pub fn height(&self) -> i32 {
        self.size().1
    }

    pub fn start(&self) -> Dims {
        Dims::ONE
    }

    pub fn end(&self) -> Dims {
        self.size() - Dims(2, 2)
    }

    pub fn mask(&self) -> &CellMask {
        &self.mask
    }

    pub fn is_valid(&self, pos: Dims) -> bool {
        let Dims(width, height) = self.size();
        0 <= pos.0 && pos.0 < width && 0 <= pos.1 && pos.1 < height
    }

    pub fn tile(&self, pos: Dims) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }

    /// `false` for positions outside the grid.
    pub fn is_path(&self, pos: Dims) -> bool {
        self.tile(pos) == Some(Tile::Path)
    }

    /// `false` for positions outside the grid.
    pub fn is_wall(&self, pos: Dims) -> bool {
        self.tile(pos) == Some(Tile::Wall)
    }

    pub fn is_carvable(&self, pos: Dims) -> bool {
        self.mask[pos]
    }

    pub fn set(&mut self, pos: Dims, tile: Tile) -> Result<(), GridError> {
        let cell = self
            .tiles
            .get_mut(pos)
            .ok_or(GridError::OutOfBounds(pos))?;
        *cell = tile;
        Ok(())
    }

    pub fn path_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Path).count()
    }

    /// Cells two steps away which are still walls and may be carved into, including the cell in
    /// between.
    pub fn neighbors_for_carving(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        Dims::ORTHOGONAL
            .into_iter()
            .filter_map(|off| {
                let next = pos + off * 2;
                (self.is_wall(next) && self.is_carvable(next) && self.is_carvable(pos + off))
                    .then_some(next)
            })
            .collect()
    }

    /// Path cells directly adjacent to `pos`.
    pub fn neighbors_for_traversal(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        Dims::ORTHOGONAL
            .into_iter()
            .map(|off| pos + off)
            .filter(|&next| self.is_path(next))
            .collect()
    }

    /// Turns `a`, `b` and the cell between them into path.
    pub fn remove_wall_between(&mut self, a: Dims, b: Dims) -> Result<(), GridError> {
        for pos in [a, b] {
            if !self.is_valid(pos) {
                return Err(GridError::OutOfBounds(pos));
            }
        }

        match b - a {
            Dims(0, 2 | -2) | Dims(2 | -2, 0) => {}
            _ => return Err(GridError::NotTwoApart(a, b)),
        }

        self.carve(a, b);
        Ok(())
    }

    /// Unchecked [`Grid::remove_wall_between`], both cells must be valid.
    pub(crate) fn carve(&mut self, a: Dims, b: Dims) {
        for pos in [a, a.midpoint(b), b] {
            self.open(pos);
        }
    }

    pub(crate) fn open(&mut self, pos: Dims) {
        self.tiles[pos] = Tile::Path;
    }
}
