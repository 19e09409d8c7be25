//! Grid index pairs.

use std::fmt;

/// A `(row, col)` index pair.
///
/// Used as an alternate addressing mode for `get`/`set` and as the element
/// type of the fixed-size neighbor kernels returned by
/// [`adjacent4_points`](crate::Matrix::adjacent4_points) and
/// [`adjacent8_points`](crate::Matrix::adjacent8_points).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Point {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_and_display() {
        let p: Point = (2, 3).into();
        assert_eq!(p, Point::new(2, 3));
        assert_eq!(p.to_string(), "(2, 3)");
    }
}
