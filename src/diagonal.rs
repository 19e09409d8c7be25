//! Diagonal access for square matrices.
//!
//! LU2RD is the left-up-to-right-down diagonal `(i, i)`; RU2LD is the
//! right-up-to-left-down diagonal `(i, cols - 1 - i)`. All operations fail
//! fast with a non-square error before touching any cell.

use crate::{shape, Matrix, MatrixError, Result};

impl<T> Matrix<T> {
    #[inline]
    fn check_square(&self) -> Result<()> {
        shape::check_square(self.rows, self.cols)
    }

    /// Offset of the `i`-th LU2RD cell in the backing buffer.
    #[inline]
    pub(crate) fn lu2rd_idx(&self, i: usize) -> usize {
        i * (self.cols + 1)
    }

    /// Offset of the `i`-th RU2LD cell in the backing buffer.
    #[inline]
    pub(crate) fn ru2ld_idx(&self, i: usize) -> usize {
        i * self.cols + (self.cols - 1 - i)
    }

    /// Apply `f` to every LU2RD diagonal cell, in place.
    pub fn update_lu2rd<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(&T) -> T,
    {
        self.check_square()?;
        for i in 0..self.rows {
            let k = self.lu2rd_idx(i);
            self.data[k] = f(&self.data[k]);
        }
        Ok(())
    }

    /// Apply `f` to every RU2LD diagonal cell, in place.
    pub fn update_ru2ld<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(&T) -> T,
    {
        self.check_square()?;
        for i in 0..self.rows {
            let k = self.ru2ld_idx(i);
            self.data[k] = f(&self.data[k]);
        }
        Ok(())
    }
}

impl<T: Clone> Matrix<T> {
    /// Materialize the LU2RD diagonal, length `rows`.
    pub fn get_lu2rd(&self) -> Result<Vec<T>> {
        self.check_square()?;
        Ok((0..self.rows)
            .map(|i| self.data[self.lu2rd_idx(i)].clone())
            .collect())
    }

    /// Materialize the RU2LD diagonal, length `rows`.
    pub fn get_ru2ld(&self) -> Result<Vec<T>> {
        self.check_square()?;
        Ok((0..self.rows)
            .map(|i| self.data[self.ru2ld_idx(i)].clone())
            .collect())
    }

    /// Overwrite the LU2RD diagonal from the first `rows` elements of
    /// `values`; surplus elements are ignored, a shortfall is an error.
    pub fn set_lu2rd(&mut self, values: &[T]) -> Result<()> {
        self.check_square()?;
        if values.len() < self.rows {
            return Err(MatrixError::LengthMismatch {
                expected: self.rows,
                actual: values.len(),
            });
        }
        for i in 0..self.rows {
            let k = self.lu2rd_idx(i);
            self.data[k] = values[i].clone();
        }
        Ok(())
    }

    /// Overwrite the RU2LD diagonal from the first `rows` elements of
    /// `values`; surplus elements are ignored, a shortfall is an error.
    pub fn set_ru2ld(&mut self, values: &[T]) -> Result<()> {
        self.check_square()?;
        if values.len() < self.rows {
            return Err(MatrixError::LengthMismatch {
                expected: self.rows,
                actual: values.len(),
            });
        }
        for i in 0..self.rows {
            let k = self.ru2ld_idx(i);
            self.data[k] = values[i].clone();
        }
        Ok(())
    }
}
