use std::ops;

use serde::{Deserialize, Serialize};

use crate::{array::Array2D, dims::Dims};

/// Marks which cells the carver may touch. Disabled cells stay walls forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellMask(Array2D<bool>);

impl CellMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self(Array2D::new(true, width, height))
    }

    pub fn new_dims_empty(size: Dims) -> Option<Self> {
        Some(Self(Array2D::new_dims(false, size)?))
    }

    pub fn size(&self) -> Dims {
        self.0.size()
    }

    pub fn is_empty(&self) -> bool {
        self.0.all(|&b| !b)
    }

    pub fn is_full(&self) -> bool {
        self.0.all(|&b| b)
    }

    pub fn enabled_count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    pub fn iter_enabled(&self) -> impl Iterator<Item = Dims> + '_ {
        self.0.iter_pos().filter(|&pos| self[pos])
    }

    /// Disables every cell of the `from..to` rectangle that lies inside the mask.
    pub fn disable_rect(&mut self, from: Dims, to: Dims) {
        for pos in Dims::iter_fill(from, to) {
            if let Some(cell) = self.0.get_mut(pos) {
                *cell = false;
            }
        }
    }

    /// Number of stored cells, enabled or not.
    pub(crate) fn cell_count(&self) -> usize {
        self.0.len()
    }
}

impl ops::Index<Dims> for CellMask {
    type Output = bool;

    /// Returns the value at the given index, or `false` if the index is out of bounds.
    fn index(&self, index: Dims) -> &Self::Output {
        self.0.get(index).unwrap_or(&false)
    }
}

impl ops::IndexMut<Dims> for CellMask {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.0
            .get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}
