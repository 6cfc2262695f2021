use std::ops;

use serde::{Deserialize, Serialize};

use crate::dims::Dims;

/// Row-major 2D buffer indexed by [`Dims`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let (x, y) = (pos.0 as usize, pos.1 as usize);
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y * self.width + x)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        let x = idx % self.width;
        let y = idx / self.width;

        Some(Dims(x as i32, y as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.width.max(1))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Array2D<U> {
        Array2D {
            buf: self.buf.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    pub fn all(&self, f: impl FnMut(&T) -> bool) -> bool {
        self.buf.iter().all(f)
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }

    /// Same as [`Array2D::new`], but returns `None` for negative sizes.
    pub fn new_dims(item: T, size: Dims) -> Option<Self> {
        if !size.all_non_negative() {
            return None;
        }

        Some(Self::new(item, size.0 as usize, size.1 as usize))
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        let arr = Array2D::new(0u8, 3, 2);
        for (i, pos) in arr.iter_pos().enumerate() {
            assert_eq!(arr.dim_to_idx(pos), Some(i));
        }
        assert_eq!(arr.idx_to_dim(4), Some(Dims(1, 1)));
    }

    #[test]
    fn out_of_bounds() {
        let arr = Array2D::new(0u8, 3, 2);
        assert_eq!(arr.get(Dims(3, 0)), None);
        assert_eq!(arr.get(Dims(0, 2)), None);
        assert_eq!(arr.get(Dims(-1, 0)), None);
        assert!(Array2D::new_dims(0u8, Dims(-1, 2)).is_none());
    }

    #[test]
    fn rows_and_map() {
        let mut arr = Array2D::new(1u8, 2, 3);
        arr[Dims(1, 2)] = 5;
        let doubled = arr.map(|v| *v as u32 * 2);
        assert_eq!(doubled[Dims(1, 2)], 10);
        assert_eq!(arr.rows().count(), 3);
        assert_eq!(arr.rows().last(), Some(&[1u8, 5][..]));
    }
}
