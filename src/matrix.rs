//! The core owned matrix type: construction, factories, cell and
//! row/column access, neighbor queries.

use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::Num;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::point::Point;
use crate::{shape, Result};

/// A dense `rows x cols` grid of `T`, stored row-major in a single owned
/// buffer.
///
/// Zero-row or zero-column construction normalizes to the distinguished
/// `0 x 0` empty matrix, so `rows() == 0` iff `cols() == 0`. The buffer is
/// exclusively owned: no two matrices ever alias, and every shape transform
/// deep-copies into a fresh buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    /// Always `rows * cols`, kept as `u64` so huge grids on 32-bit hosts
    /// still report an exact count.
    pub(crate) count: u64,
    pub(crate) data: Vec<T>,
}

// ============================================================================
// Construction
// ============================================================================

impl<T> Matrix<T> {
    /// Build from nested rows. Fails if the rows are jagged; an input with
    /// zero rows or zero columns normalizes to [`Matrix::empty`].
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        shape::check_rectangular(&rows)?;
        let r = rows.len();
        let c = rows.first().map_or(0, Vec::len);
        if r == 0 || c == 0 {
            return Ok(Self::empty());
        }
        let mut data = Vec::with_capacity(r * c);
        for row in rows {
            data.extend(row);
        }
        Ok(Self::from_parts(r, c, data))
    }

    /// Build from an already-linearized row-major buffer. The buffer length
    /// must be exactly `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = if rows == 0 || cols == 0 { 0 } else { rows * cols };
        if data.len() != expected {
            return Err(crate::MatrixError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Build by evaluating `f(row, col)` for every cell, row-major.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self::from_parts(rows, cols, data)
    }

    /// The distinguished `0 x 0` matrix.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            count: 0,
            data: Vec::new(),
        }
    }

    /// Fill every cell from a source of randomness.
    pub fn random<R>(rows: usize, cols: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        Standard: Distribution<T>,
    {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        let data = (0..rows * cols).map(|_| rng.gen()).collect();
        Self::from_parts(rows, cols, data)
    }

    /// Internal: wrap a buffer whose length is already `rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        if rows == 0 || cols == 0 {
            debug_assert!(data.is_empty());
            return Self::empty();
        }
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            rows,
            cols,
            count: rows as u64 * cols as u64,
            data,
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// A `rows x cols` matrix with every cell set to `value`.
    pub fn repeat(rows: usize, cols: usize, value: T) -> Self {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        Self::from_parts(rows, cols, vec![value; rows * cols])
    }
}

impl<T: Clone + Default> Matrix<T> {
    /// A square matrix with `values` on the LU2RD diagonal and
    /// `T::default()` everywhere else.
    pub fn diagonal(values: &[T]) -> Self {
        let n = values.len();
        let mut m = Self::repeat(n, n, T::default());
        for (i, v) in values.iter().enumerate() {
            m.data[i * n + i] = v.clone();
        }
        m
    }
}

impl<T: Copy + Num> Matrix<T> {
    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// A `rows x cols` matrix holding consecutive values starting at
    /// `start`, laid out row-major.
    pub fn range(rows: usize, cols: usize, start: T) -> Self {
        let mut next = start;
        Self::from_fn(rows, cols, |_, _| {
            let cur = next;
            next = next + T::one();
            cur
        })
    }
}

// ============================================================================
// Shape and cell access
// ============================================================================

impl<T> Matrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, `rows * cols`.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub(crate) fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Borrow the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        shape::check_index(row, col, self.rows, self.cols)?;
        Ok(&self.data[self.idx(row, col)])
    }

    /// Borrow the cell at `point`.
    pub fn get_at(&self, point: Point) -> Result<&T> {
        self.get(point.row, point.col)
    }

    /// Overwrite the cell at `(row, col)` in place.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        shape::check_index(row, col, self.rows, self.cols)?;
        let k = self.idx(row, col);
        self.data[k] = value;
        Ok(())
    }

    /// Overwrite the cell at `point` in place.
    pub fn set_at(&mut self, point: Point, value: T) -> Result<()> {
        self.set(point.row, point.col, value)
    }
}

// ============================================================================
// Neighbor queries
// ============================================================================

impl<T> Matrix<T> {
    /// The cell above `(row, col)`, or `None` at the top edge (or for a
    /// center outside the grid).
    pub fn up_of(&self, row: usize, col: usize) -> Option<&T> {
        self.neighbor(row, col, -1, 0)
    }

    /// The cell below `(row, col)`, or `None` at the bottom edge.
    pub fn down_of(&self, row: usize, col: usize) -> Option<&T> {
        self.neighbor(row, col, 1, 0)
    }

    /// The cell left of `(row, col)`, or `None` at the left edge.
    pub fn left_of(&self, row: usize, col: usize) -> Option<&T> {
        self.neighbor(row, col, 0, -1)
    }

    /// The cell right of `(row, col)`, or `None` at the right edge.
    pub fn right_of(&self, row: usize, col: usize) -> Option<&T> {
        self.neighbor(row, col, 0, 1)
    }

    /// The four edge-adjacent neighbor points in order
    /// `{up, right, down, left}`. Neighbors outside the grid stay in place
    /// as `None`, so the array can be zipped against a fixed 4-kernel.
    pub fn adjacent4_points(&self, row: usize, col: usize) -> [Option<Point>; 4] {
        [
            self.offset_point(row, col, -1, 0),
            self.offset_point(row, col, 0, 1),
            self.offset_point(row, col, 1, 0),
            self.offset_point(row, col, 0, -1),
        ]
    }

    /// The eight neighbor points in order `{left-up, up, right-up, right,
    /// right-down, down, left-down, left}`, with `None` holding the place of
    /// any neighbor outside the grid.
    pub fn adjacent8_points(&self, row: usize, col: usize) -> [Option<Point>; 8] {
        [
            self.offset_point(row, col, -1, -1),
            self.offset_point(row, col, -1, 0),
            self.offset_point(row, col, -1, 1),
            self.offset_point(row, col, 0, 1),
            self.offset_point(row, col, 1, 1),
            self.offset_point(row, col, 1, 0),
            self.offset_point(row, col, 1, -1),
            self.offset_point(row, col, 0, -1),
        ]
    }

    fn offset_point(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Point> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then_some(Point::new(r, c))
    }

    fn neighbor(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<&T> {
        let p = self.offset_point(row, col, dr, dc)?;
        Some(&self.data[self.idx(p.row, p.col)])
    }
}

// ============================================================================
// Row and column access
// ============================================================================

impl<T> Matrix<T> {
    /// Borrow row `row` directly from the backing buffer (rows are
    /// contiguous in row-major storage, so this never copies).
    pub fn row(&self, row: usize) -> Result<&[T]> {
        shape::check_row(row, self.rows)?;
        Ok(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Mutably borrow row `row`.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut [T]> {
        shape::check_row(row, self.rows)?;
        let cols = self.cols;
        Ok(&mut self.data[row * cols..(row + 1) * cols])
    }

    /// Apply `f` to every cell of one row, in place. Always sequential.
    pub fn update_row<F>(&mut self, row: usize, f: F) -> Result<()>
    where
        F: Fn(&T) -> T,
    {
        for cell in self.row_mut(row)? {
            *cell = f(cell);
        }
        Ok(())
    }

    /// Apply `f` to every cell of one column, in place. Always sequential.
    pub fn update_column<F>(&mut self, col: usize, f: F) -> Result<()>
    where
        F: Fn(&T) -> T,
    {
        shape::check_col(col, self.cols)?;
        for i in 0..self.rows {
            let k = self.idx(i, col);
            self.data[k] = f(&self.data[k]);
        }
        Ok(())
    }
}

impl<T: Clone> Matrix<T> {
    /// Copy of row `row`.
    pub fn row_copied(&self, row: usize) -> Result<Vec<T>> {
        Ok(self.row(row)?.to_vec())
    }

    /// Materialized copy of column `col`. Columns are not contiguous in
    /// row-major storage, so column access always copies.
    pub fn column(&self, col: usize) -> Result<Vec<T>> {
        shape::check_col(col, self.cols)?;
        Ok((0..self.rows)
            .map(|i| self.data[self.idx(i, col)].clone())
            .collect())
    }

    /// Overwrite row `row` in place. `values` must have exactly `cols`
    /// elements.
    pub fn set_row(&mut self, row: usize, values: &[T]) -> Result<()> {
        shape::check_row(row, self.rows)?;
        if values.len() != self.cols {
            return Err(crate::MatrixError::LengthMismatch {
                expected: self.cols,
                actual: values.len(),
            });
        }
        let cols = self.cols;
        self.data[row * cols..(row + 1) * cols].clone_from_slice(values);
        Ok(())
    }

    /// Overwrite column `col` in place. `values` must have exactly `rows`
    /// elements.
    pub fn set_column(&mut self, col: usize, values: &[T]) -> Result<()> {
        shape::check_col(col, self.cols)?;
        if values.len() != self.rows {
            return Err(crate::MatrixError::LengthMismatch {
                expected: self.rows,
                actual: values.len(),
            });
        }
        for (i, v) in values.iter().enumerate() {
            let k = self.idx(i, col);
            self.data[k] = v.clone();
        }
        Ok(())
    }
}

// ============================================================================
// Operators and formatting
// ============================================================================

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// Panicking cell access; prefer [`Matrix::get`] when the index is not
    /// statically known to be in bounds.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        let k = row * self.cols + col;
        &mut self.data[k]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    /// Pretty-prints the grid, one bracketed row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[self.idx(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
