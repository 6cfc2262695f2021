use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Position or size on the grid, `Dims(x, y)`.
///
/// `y` grows downwards. Ordering is lexicographic over `(x, y)`, which the solver relies on for
/// breaking ties between equally promising cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    pub const DOWN: Dims = Dims(0, 1);
    pub const RIGHT: Dims = Dims(1, 0);
    pub const UP: Dims = Dims(0, -1);
    pub const LEFT: Dims = Dims(-1, 0);

    /// Unit offsets in the order used by every neighbor query: down, right, up, left.
    pub const ORTHOGONAL: [Dims; 4] = [Dims::DOWN, Dims::RIGHT, Dims::UP, Dims::LEFT];

    /// Iterates all positions in the `from..to` rectangle, row by row.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn manhattan(self, other: Dims) -> u32 {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Midpoint of two positions, rounding towards negative infinity.
    pub fn midpoint(self, other: Dims) -> Dims {
        Dims(
            (self.0 + other.0).div_euclid(2),
            (self.1 + other.1).div_euclid(2),
        )
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

impl Mul<i32> for Dims {
    type Output = Dims;

    fn mul(self, other: i32) -> Dims {
        Dims(self.0 * other, self.1 * other)
    }
}

impl Div<i32> for Dims {
    type Output = Dims;

    fn div(self, other: i32) -> Dims {
        Dims(self.0 / other, self.1 / other)
    }
}

impl From<(i32, i32)> for Dims {
    fn from(tuple: (i32, i32)) -> Self {
        Dims(tuple.0, tuple.1)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(val: Dims) -> Self {
        (val.0, val.1)
    }
}
