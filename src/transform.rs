//! Geometric and shape transforms.
//!
//! Everything here is out-of-place and deep-copies into a fresh buffer,
//! except the `reverse_*` mirrors which mutate in place. Range and shape
//! preconditions are validated before any allocation.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::policy::ParallelPolicy;
use crate::{shape, Matrix, MatrixError, Result};

// ============================================================================
// Sub-rectangle extraction and padding
// ============================================================================

impl<T: Clone> Matrix<T> {
    /// Deep copy of the row range `[from_row, to_row)`, all columns.
    pub fn copy_rows(&self, from_row: usize, to_row: usize) -> Result<Self> {
        shape::check_range(from_row, to_row, self.rows)?;
        let data = self.data[from_row * self.cols..to_row * self.cols].to_vec();
        Ok(Self::from_parts(to_row - from_row, self.cols, data))
    }

    /// Deep copy of the sub-rectangle `[from_row, to_row) x [from_col, to_col)`.
    pub fn copy_range(
        &self,
        from_row: usize,
        to_row: usize,
        from_col: usize,
        to_col: usize,
    ) -> Result<Self> {
        shape::check_range(from_row, to_row, self.rows)?;
        shape::check_range(from_col, to_col, self.cols)?;
        let (r, c) = (to_row - from_row, to_col - from_col);
        if r == 0 || c == 0 {
            return Ok(Self::empty());
        }
        let mut data = Vec::with_capacity(r * c);
        for i in from_row..to_row {
            let start = self.idx(i, from_col);
            data.extend_from_slice(&self.data[start..start + c]);
        }
        Ok(Self::from_parts(r, c, data))
    }

    /// Grow to `max(new_rows, rows) x max(new_cols, cols)`, padding the new
    /// bottom/right cells with `default`. When neither dimension grows this
    /// degrades to a plain copy.
    pub fn extend(&self, new_rows: usize, new_cols: usize, default: T) -> Self {
        let r = new_rows.max(self.rows);
        let c = new_cols.max(self.cols);
        Self::from_fn(r, c, |i, j| {
            if i < self.rows && j < self.cols {
                self.data[self.idx(i, j)].clone()
            } else {
                default.clone()
            }
        })
    }

    /// Pad on all four sides, re-anchoring the original content at offset
    /// `(to_up, to_left)`.
    pub fn extend_directed(
        &self,
        to_up: usize,
        to_down: usize,
        to_left: usize,
        to_right: usize,
        default: T,
    ) -> Self {
        let r = self.rows + to_up + to_down;
        let c = self.cols + to_left + to_right;
        Self::from_fn(r, c, |i, j| {
            let inside = i >= to_up && i < to_up + self.rows && j >= to_left && j < to_left + self.cols;
            if inside {
                self.data[self.idx(i - to_up, j - to_left)].clone()
            } else {
                default.clone()
            }
        })
    }
}

// ============================================================================
// Mirrors and rotations
// ============================================================================

impl<T> Matrix<T> {
    /// Mirror every row in place (left-right flip).
    pub fn reverse_h(&mut self) {
        if self.is_empty() {
            return;
        }
        for row in self.data.chunks_exact_mut(self.cols) {
            row.reverse();
        }
    }

    /// Mirror the row order in place (top-bottom flip).
    pub fn reverse_v(&mut self) {
        for i in 0..self.rows / 2 {
            let other = self.rows - 1 - i;
            for j in 0..self.cols {
                self.data.swap(i * self.cols + j, other * self.cols + j);
            }
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Out-of-place left-right mirror.
    pub fn flip_h(&self) -> Self {
        let mut m = self.clone();
        m.reverse_h();
        m
    }

    /// Out-of-place top-bottom mirror.
    pub fn flip_v(&self) -> Self {
        let mut m = self.clone();
        m.reverse_v();
        m
    }

    /// Clockwise quarter turn; the result is `cols x rows`.
    pub fn rotate90(&self) -> Self {
        let rows = self.rows;
        Self::from_fn(self.cols, self.rows, |i, j| {
            self.data[self.idx(rows - 1 - j, i)].clone()
        })
    }

    /// Half turn; extents are kept, both axes reversed.
    pub fn rotate180(&self) -> Self {
        let data: Vec<T> = self.data.iter().rev().cloned().collect();
        Self::from_parts(self.rows, self.cols, data)
    }

    /// Counter-quarter turn (270 degrees clockwise); the result is
    /// `cols x rows`.
    pub fn rotate270(&self) -> Self {
        let cols = self.cols;
        Self::from_fn(self.cols, self.rows, |i, j| {
            self.data[self.idx(j, cols - 1 - i)].clone()
        })
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.data[self.idx(j, i)].clone())
    }
}

// ============================================================================
// Reinterpretation and tiling
// ============================================================================

impl<T: Clone + Default> Matrix<T> {
    /// Reinterpret the row-major linearization as a `new_rows x new_cols`
    /// grid. Surplus source cells are dropped; a shortfall is padded with
    /// `T::default()`. Both lenient policies are deliberate, not errors.
    pub fn reshape(&self, new_rows: usize, new_cols: usize) -> Self {
        if new_rows == 0 || new_cols == 0 {
            return Self::empty();
        }
        let data = (0..new_rows * new_cols)
            .map(|k| self.data.get(k).cloned().unwrap_or_default())
            .collect();
        Self::from_parts(new_rows, new_cols, data)
    }
}

impl<T: Clone> Matrix<T> {
    /// Replace each cell with a `row_repeats x col_repeats` block of itself.
    /// Both factors must be positive.
    pub fn repelem(&self, row_repeats: usize, col_repeats: usize) -> Result<Self> {
        if row_repeats == 0 || col_repeats == 0 {
            return Err(MatrixError::NonPositiveRepeat(row_repeats, col_repeats));
        }
        if self.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self::from_fn(
            self.rows * row_repeats,
            self.cols * col_repeats,
            |i, j| self.data[self.idx(i / row_repeats, j / col_repeats)].clone(),
        ))
    }

    /// Tile the whole matrix `row_repeats x col_repeats` times. Both factors
    /// must be positive.
    pub fn repmat(&self, row_repeats: usize, col_repeats: usize) -> Result<Self> {
        if row_repeats == 0 || col_repeats == 0 {
            return Err(MatrixError::NonPositiveRepeat(row_repeats, col_repeats));
        }
        if self.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self::from_fn(
            self.rows * row_repeats,
            self.cols * col_repeats,
            |i, j| self.data[self.idx(i % self.rows, j % self.cols)].clone(),
        ))
    }

    /// Row-major linearization into a fresh `Vec`.
    pub fn flatten(&self) -> Vec<T> {
        self.data.clone()
    }
}

impl<T> Matrix<T> {
    /// Consume the matrix and return its row-major buffer without copying.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

// ============================================================================
// Stacking and elementwise combination
// ============================================================================

impl<T: Clone> Matrix<T> {
    /// Vertical concatenation; column counts must match. Stacking with the
    /// empty matrix returns the other operand unchanged.
    pub fn vstack(&self, other: &Self) -> Result<Self> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.cols != other.cols {
            return Err(MatrixError::ShapeMismatch(
                self.rows, self.cols, other.rows, other.cols,
            ));
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Self::from_parts(self.rows + other.rows, self.cols, data))
    }

    /// Horizontal concatenation; row counts must match. Stacking with the
    /// empty matrix returns the other operand unchanged.
    pub fn hstack(&self, other: &Self) -> Result<Self> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.rows != other.rows {
            return Err(MatrixError::ShapeMismatch(
                self.rows, self.cols, other.rows, other.cols,
            ));
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
            data.extend_from_slice(&other.data[i * other.cols..(i + 1) * other.cols]);
        }
        Ok(Self::from_parts(self.rows, cols, data))
    }
}

impl<T: Clone + Send + Sync> Matrix<T> {
    /// Elementwise combination of two same-shape matrices.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(&T, &T) -> T + Sync,
    {
        self.zip_with_policy(&ParallelPolicy::new(), other, f)
    }

    /// [`Matrix::zip_with`] with an explicit policy.
    pub fn zip_with_policy<F>(&self, policy: &ParallelPolicy, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(&T, &T) -> T + Sync,
    {
        shape::check_same_shape(self.rows, self.cols, other.rows, other.cols)?;
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let data: Vec<T> = self
                .data
                .par_iter()
                .zip(other.data.par_iter())
                .map(|(a, b)| f(a, b))
                .collect();
            return Ok(Self::from_parts(self.rows, self.cols, data));
        }
        let _ = policy;
        let data: Vec<T> = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Self::from_parts(self.rows, self.cols, data))
    }

    /// Three-way elementwise combination; all operands must share one shape.
    pub fn zip_with3<F>(&self, b: &Self, c: &Self, f: F) -> Result<Self>
    where
        F: Fn(&T, &T, &T) -> T + Sync,
    {
        self.zip_with3_policy(&ParallelPolicy::new(), b, c, f)
    }

    /// [`Matrix::zip_with3`] with an explicit policy.
    pub fn zip_with3_policy<F>(
        &self,
        policy: &ParallelPolicy,
        b: &Self,
        c: &Self,
        f: F,
    ) -> Result<Self>
    where
        F: Fn(&T, &T, &T) -> T + Sync,
    {
        shape::check_same_shape(self.rows, self.cols, b.rows, b.cols)?;
        shape::check_same_shape(self.rows, self.cols, c.rows, c.cols)?;
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let data: Vec<T> = self
                .data
                .par_iter()
                .zip(b.data.par_iter())
                .zip(c.data.par_iter())
                .map(|((x, y), z)| f(x, y, z))
                .collect();
            return Ok(Self::from_parts(self.rows, self.cols, data));
        }
        let _ = policy;
        let data: Vec<T> = self
            .data
            .iter()
            .zip(b.data.iter())
            .zip(c.data.iter())
            .map(|((x, y), z)| f(x, y, z))
            .collect();
        Ok(Self::from_parts(self.rows, self.cols, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m2x2() -> Matrix<i32> {
        Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap()
    }

    fn m2x3() -> Matrix<i32> {
        Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn copy_rows_and_range() {
        let m = m2x3();
        let top = m.copy_rows(0, 1).unwrap();
        assert_eq!(top, Matrix::from_rows(vec![vec![1, 2, 3]]).unwrap());
        let mid = m.copy_range(0, 2, 1, 3).unwrap();
        assert_eq!(mid, Matrix::from_rows(vec![vec![2, 3], vec![5, 6]]).unwrap());
        assert!(m.copy_rows(1, 3).is_err());
        assert!(m.copy_range(0, 1, 2, 1).is_err());
        assert!(m.copy_rows(1, 1).unwrap().is_empty());
    }

    #[test]
    fn extend_pads_bottom_right() {
        let m = m2x2();
        let e = m.extend(3, 3, 0);
        assert_eq!(
            e,
            Matrix::from_rows(vec![vec![1, 2, 0], vec![3, 4, 0], vec![0, 0, 0]]).unwrap()
        );
        // Degrades to a copy when nothing grows.
        assert_eq!(m.extend(1, 2, 0), m);
        // Grows in a single dimension without shrinking the other.
        let wide = m.extend(1, 3, 9);
        assert_eq!(
            wide,
            Matrix::from_rows(vec![vec![1, 2, 9], vec![3, 4, 9]]).unwrap()
        );
    }

    #[test]
    fn extend_directed_re_anchors() {
        let m = m2x2();
        let e = m.extend_directed(1, 0, 1, 0, 0);
        assert_eq!(
            e,
            Matrix::from_rows(vec![vec![0, 0, 0], vec![0, 1, 2], vec![0, 3, 4]]).unwrap()
        );
        assert_eq!(*e.get(1, 1).unwrap(), 1);
    }

    #[test]
    fn mirrors() {
        let mut m = m2x3();
        m.reverse_h();
        assert_eq!(m.flatten(), vec![3, 2, 1, 6, 5, 4]);

        let mut m = m2x3();
        m.reverse_v();
        assert_eq!(m.flatten(), vec![4, 5, 6, 1, 2, 3]);

        let m = m2x3();
        assert_eq!(m.flip_h().flatten(), vec![3, 2, 1, 6, 5, 4]);
        assert_eq!(m.flip_v().flatten(), vec![4, 5, 6, 1, 2, 3]);
        // Out-of-place flips leave the source alone.
        assert_eq!(m.flatten(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn quarter_turns() {
        let m = m2x2();
        assert_eq!(
            m.rotate90(),
            Matrix::from_rows(vec![vec![3, 1], vec![4, 2]]).unwrap()
        );
        assert_eq!(
            m.rotate180(),
            Matrix::from_rows(vec![vec![4, 3], vec![2, 1]]).unwrap()
        );
        assert_eq!(
            m.rotate270(),
            Matrix::from_rows(vec![vec![2, 4], vec![1, 3]]).unwrap()
        );

        let r = m2x3().rotate90();
        assert_eq!(r.rows(), 3);
        assert_eq!(r.cols(), 2);
        assert_eq!(
            r,
            Matrix::from_rows(vec![vec![4, 1], vec![5, 2], vec![6, 3]]).unwrap()
        );
    }

    #[test]
    fn rotation_cycle() {
        let m = m2x3();
        assert_eq!(m.rotate90().rotate90().rotate90().rotate90(), m);
        assert_eq!(m.rotate90().rotate90(), m.rotate180());
        assert_eq!(m.rotate90().rotate180(), m.rotate270());
    }

    #[test]
    fn transpose_swaps_extents() {
        let m = m2x3();
        let t = m.transpose();
        assert_eq!(
            t,
            Matrix::from_rows(vec![vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap()
        );
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn reshape_drops_or_pads() {
        let m = m2x3();
        assert_eq!(
            m.reshape(3, 2),
            Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap()
        );
        // Fewer cells: remainder dropped.
        assert_eq!(m.reshape(1, 4).flatten(), vec![1, 2, 3, 4]);
        // More cells: zero-padded.
        assert_eq!(m.reshape(2, 4).flatten(), vec![1, 2, 3, 4, 5, 6, 0, 0]);
        assert!(m.reshape(0, 5).is_empty());
    }

    #[test]
    fn repelem_blocks_cells() {
        let m = m2x2();
        let r = m.repelem(2, 2).unwrap();
        assert_eq!(
            r,
            Matrix::from_rows(vec![
                vec![1, 1, 2, 2],
                vec![1, 1, 2, 2],
                vec![3, 3, 4, 4],
                vec![3, 3, 4, 4],
            ])
            .unwrap()
        );
        assert!(matches!(
            m.repelem(0, 2),
            Err(MatrixError::NonPositiveRepeat(0, 2))
        ));
    }

    #[test]
    fn repmat_tiles_whole_matrix() {
        let m = m2x2();
        let r = m.repmat(1, 2).unwrap();
        assert_eq!(
            r,
            Matrix::from_rows(vec![vec![1, 2, 1, 2], vec![3, 4, 3, 4]]).unwrap()
        );
        assert!(m.repmat(2, 0).is_err());
    }

    #[test]
    fn flatten_and_into_vec() {
        let m = m2x3();
        assert_eq!(m.flatten(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.into_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn vstack_requires_matching_cols() {
        let m = m2x2();
        let extra = Matrix::from_rows(vec![vec![5, 6]]).unwrap();
        assert_eq!(
            m.vstack(&extra).unwrap(),
            Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap()
        );
        let bad = Matrix::from_rows(vec![vec![1, 2, 3]]).unwrap();
        assert!(matches!(
            m.vstack(&bad),
            Err(MatrixError::ShapeMismatch(2, 2, 1, 3))
        ));
        assert_eq!(m.vstack(&Matrix::empty()).unwrap(), m);
    }

    #[test]
    fn hstack_requires_matching_rows() {
        let m = m2x2();
        let extra = Matrix::from_rows(vec![vec![5], vec![6]]).unwrap();
        assert_eq!(
            m.hstack(&extra).unwrap(),
            Matrix::from_rows(vec![vec![1, 2, 5], vec![3, 4, 6]]).unwrap()
        );
        let bad = Matrix::from_rows(vec![vec![1, 2]]).unwrap();
        assert!(m.hstack(&bad).is_err());
    }

    #[test]
    fn zip_with_identity_returns_left() {
        let m = m2x3();
        assert_eq!(m.zip_with(&m, |a, _| *a).unwrap(), m);
    }

    #[test]
    fn zip_with_shape_checked() {
        let m = m2x3();
        let other = m2x2();
        assert!(m.zip_with(&other, |a, b| a + b).is_err());
    }

    #[test]
    fn zip_with3_combines() {
        let a = m2x2();
        let b = Matrix::repeat(2, 2, 10);
        let c = Matrix::repeat(2, 2, 100);
        let out = a.zip_with3(&b, &c, |x, y, z| x + y + z).unwrap();
        assert_eq!(out.flatten(), vec![111, 112, 113, 114]);
    }
}
