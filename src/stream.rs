//! Lazy, restartable iterators over matrix orderings.
//!
//! Each `stream_*` method validates its range up front and returns a fresh
//! iterator borrowing the matrix, so re-calling the method always yields an
//! independent, restartable sequence. The borrow checker enforces the
//! snapshot contract: the matrix cannot be mutated while an iterator is
//! alive. All iterators advance by index arithmetic, so `nth`/`skip` are
//! O(1) rather than element-by-element.

use crate::{shape, Matrix, Result};

impl<T> Matrix<T> {
    /// Row-major iteration over the whole matrix.
    pub fn stream_h(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Row-major iteration over the row range `[from_row, to_row)`.
    pub fn stream_h_range(&self, from_row: usize, to_row: usize) -> Result<std::slice::Iter<'_, T>> {
        shape::check_range(from_row, to_row, self.rows)?;
        Ok(self.data[from_row * self.cols..to_row * self.cols].iter())
    }

    /// Column-major iteration over the whole matrix (row is the
    /// fast-varying index).
    pub fn stream_v(&self) -> ColMajorIter<'_, T> {
        ColMajorIter::new(self, 0, self.cols)
    }

    /// Column-major iteration over the column range `[from_col, to_col)`.
    pub fn stream_v_range(&self, from_col: usize, to_col: usize) -> Result<ColMajorIter<'_, T>> {
        shape::check_range(from_col, to_col, self.cols)?;
        Ok(ColMajorIter::new(self, from_col, to_col))
    }

    /// One element per LU2RD diagonal index; requires a square matrix.
    pub fn stream_lu2rd(&self) -> Result<DiagIter<'_, T>> {
        shape::check_square(self.rows, self.cols)?;
        Ok(DiagIter {
            data: &self.data,
            start: 0,
            step: self.cols + 1,
            i: 0,
            len: self.rows,
        })
    }

    /// One element per RU2LD diagonal index; requires a square matrix.
    pub fn stream_ru2ld(&self) -> Result<DiagIter<'_, T>> {
        shape::check_square(self.rows, self.cols)?;
        let (start, step) = if self.cols == 0 { (0, 0) } else { (self.cols - 1, self.cols - 1) };
        Ok(DiagIter {
            data: &self.data,
            start,
            step,
            i: 0,
            len: self.rows,
        })
    }

    /// One inner row-iterator per row.
    pub fn stream_r(&self) -> RowsIter<'_, T> {
        RowsIter {
            data: &self.data,
            cols: self.cols,
            row: 0,
            end: self.rows,
        }
    }

    /// One inner row-iterator per row in `[from_row, to_row)`.
    pub fn stream_r_range(&self, from_row: usize, to_row: usize) -> Result<RowsIter<'_, T>> {
        shape::check_range(from_row, to_row, self.rows)?;
        Ok(RowsIter {
            data: &self.data,
            cols: self.cols,
            row: from_row,
            end: to_row,
        })
    }

    /// One lazy inner column-iterator per column.
    pub fn stream_c(&self) -> ColsIter<'_, T> {
        ColsIter {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            col: 0,
            end: self.cols,
        }
    }

    /// One lazy inner column-iterator per column in `[from_col, to_col)`.
    pub fn stream_c_range(&self, from_col: usize, to_col: usize) -> Result<ColsIter<'_, T>> {
        shape::check_range(from_col, to_col, self.cols)?;
        Ok(ColsIter {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            col: from_col,
            end: to_col,
        })
    }
}

// ============================================================================
// Column-major flatten
// ============================================================================

/// Column-major iterator over a column range; see [`Matrix::stream_v`].
#[derive(Clone, Debug)]
pub struct ColMajorIter<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    col0: usize,
    pos: usize,
    end: usize,
}

impl<'a, T> ColMajorIter<'a, T> {
    fn new(m: &'a Matrix<T>, from_col: usize, to_col: usize) -> Self {
        Self {
            data: &m.data,
            rows: m.rows,
            cols: m.cols,
            col0: from_col,
            pos: 0,
            end: (to_col - from_col) * m.rows,
        }
    }
}

impl<'a, T> Iterator for ColMajorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.pos >= self.end {
            return None;
        }
        let k = self.pos;
        self.pos += 1;
        let col = self.col0 + k / self.rows;
        let row = k % self.rows;
        Some(&self.data[row * self.cols + col])
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let remaining = self.end - self.pos;
        if n >= remaining {
            self.pos = self.end;
            return None;
        }
        self.pos += n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ColMajorIter<'_, T> {}
impl<T> std::iter::FusedIterator for ColMajorIter<'_, T> {}

// ============================================================================
// Diagonal walk
// ============================================================================

/// Diagonal iterator; see [`Matrix::stream_lu2rd`] / [`Matrix::stream_ru2ld`].
#[derive(Clone, Debug)]
pub struct DiagIter<'a, T> {
    data: &'a [T],
    start: usize,
    step: usize,
    i: usize,
    len: usize,
}

impl<'a, T> Iterator for DiagIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.i >= self.len {
            return None;
        }
        let k = self.start + self.i * self.step;
        self.i += 1;
        Some(&self.data[k])
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let remaining = self.len - self.i;
        if n >= remaining {
            self.i = self.len;
            return None;
        }
        self.i += n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.i;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for DiagIter<'_, T> {}
impl<T> std::iter::FusedIterator for DiagIter<'_, T> {}

// ============================================================================
// Row-of-rows and column-of-columns
// ============================================================================

/// Iterator of per-row iterators; see [`Matrix::stream_r`].
#[derive(Clone, Debug)]
pub struct RowsIter<'a, T> {
    data: &'a [T],
    cols: usize,
    row: usize,
    end: usize,
}

impl<'a, T> Iterator for RowsIter<'a, T> {
    type Item = std::slice::Iter<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.end {
            return None;
        }
        let start = self.row * self.cols;
        self.row += 1;
        Some(self.data[start..start + self.cols].iter())
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let remaining = self.end - self.row;
        if n >= remaining {
            self.row = self.end;
            return None;
        }
        self.row += n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.row;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for RowsIter<'_, T> {}
impl<T> std::iter::FusedIterator for RowsIter<'_, T> {}

/// Iterator of per-column iterators; see [`Matrix::stream_c`].
#[derive(Clone, Debug)]
pub struct ColsIter<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    col: usize,
    end: usize,
}

impl<'a, T> Iterator for ColsIter<'a, T> {
    type Item = ColIter<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.end {
            return None;
        }
        let col = self.col;
        self.col += 1;
        Some(ColIter {
            data: self.data,
            rows: self.rows,
            cols: self.cols,
            col,
            row: 0,
        })
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let remaining = self.end - self.col;
        if n >= remaining {
            self.col = self.end;
            return None;
        }
        self.col += n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.col;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ColsIter<'_, T> {}
impl<T> std::iter::FusedIterator for ColsIter<'_, T> {}

/// Lazy walk down a single column; see [`Matrix::stream_c`].
#[derive(Clone, Debug)]
pub struct ColIter<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    col: usize,
    row: usize,
}

impl<'a, T> Iterator for ColIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.row >= self.rows {
            return None;
        }
        let k = self.row * self.cols + self.col;
        self.row += 1;
        Some(&self.data[k])
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let remaining = self.rows - self.row;
        if n >= remaining {
            self.row = self.rows;
            return None;
        }
        self.row += n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows - self.row;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ColIter<'_, T> {}
impl<T> std::iter::FusedIterator for ColIter<'_, T> {}
