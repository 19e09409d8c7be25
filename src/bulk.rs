//! Bulk mutation and elementwise mapping.
//!
//! Each operation here consults a [`ParallelPolicy`] once at entry and then
//! runs either a sequential nested loop or a rayon fan-out over disjoint
//! destination rows. The `*_policy` variants take the policy explicitly so
//! callers (and the equivalence tests) can force either path; the plain
//! variants use [`ParallelPolicy::new`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::policy::{OuterDim, ParallelPolicy};
use crate::Matrix;

impl<T: Send + Sync> Matrix<T> {
    /// Replace every cell with `f(cell)`.
    pub fn update_all<F>(&mut self, f: F)
    where
        F: Fn(&T) -> T + Sync,
    {
        self.update_all_policy(&ParallelPolicy::new(), f);
    }

    /// [`Matrix::update_all`] with an explicit policy.
    pub fn update_all_policy<F>(&mut self, policy: &ParallelPolicy, f: F)
    where
        F: Fn(&T) -> T + Sync,
    {
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let f = &f;
            self.data.par_chunks_mut(self.cols).for_each(|row| {
                for cell in row {
                    *cell = f(cell);
                }
            });
            return;
        }
        let _ = policy;
        for cell in &mut self.data {
            *cell = f(cell);
        }
    }

    /// Replace every cell with `f(row, col)`, ignoring the current value.
    pub fn update_all_indexed<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> T + Sync,
    {
        self.update_all_indexed_policy(&ParallelPolicy::new(), f);
    }

    /// [`Matrix::update_all_indexed`] with an explicit policy.
    pub fn update_all_indexed_policy<F>(&mut self, policy: &ParallelPolicy, f: F)
    where
        F: Fn(usize, usize) -> T + Sync,
    {
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let f = &f;
            let cols = self.cols;
            self.data
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(i, row)| {
                    for (j, cell) in row.iter_mut().enumerate() {
                        *cell = f(i, j);
                    }
                });
            return;
        }
        let _ = policy;
        match ParallelPolicy::choose_outer(self.rows, self.cols) {
            OuterDim::ByRow => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        self.data[i * self.cols + j] = f(i, j);
                    }
                }
            }
            OuterDim::ByColumn => {
                for j in 0..self.cols {
                    for i in 0..self.rows {
                        self.data[i * self.cols + j] = f(i, j);
                    }
                }
            }
        }
    }

    /// Out-of-place elementwise transform into a fresh matrix of the same
    /// element type.
    pub fn map<F>(&self, f: F) -> Matrix<T>
    where
        F: Fn(&T) -> T + Sync,
    {
        self.map_to(f)
    }

    /// [`Matrix::map`] with an explicit policy.
    pub fn map_policy<F>(&self, policy: &ParallelPolicy, f: F) -> Matrix<T>
    where
        F: Fn(&T) -> T + Sync,
    {
        self.map_to_policy(policy, f)
    }

    /// Out-of-place transform into an arbitrary target element type; the
    /// integration point for boxing a primitive grid into richer domain
    /// objects.
    pub fn map_to<U, F>(&self, f: F) -> Matrix<U>
    where
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        self.map_to_policy(&ParallelPolicy::new(), f)
    }

    /// [`Matrix::map_to`] with an explicit policy.
    pub fn map_to_policy<U, F>(&self, policy: &ParallelPolicy, f: F) -> Matrix<U>
    where
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let data: Vec<U> = self.data.par_iter().map(&f).collect();
            return Matrix::from_parts(self.rows, self.cols, data);
        }
        let _ = policy;
        let data: Vec<U> = self.data.iter().map(&f).collect();
        Matrix::from_parts(self.rows, self.cols, data)
    }
}

impl<T: Clone + Send + Sync> Matrix<T> {
    /// Overwrite every cell matching `pred` with `value`, in place.
    pub fn replace_if<P>(&mut self, pred: P, value: T)
    where
        P: Fn(&T) -> bool + Sync,
    {
        self.replace_if_policy(&ParallelPolicy::new(), pred, value);
    }

    /// [`Matrix::replace_if`] with an explicit policy.
    pub fn replace_if_policy<P>(&mut self, policy: &ParallelPolicy, pred: P, value: T)
    where
        P: Fn(&T) -> bool + Sync,
    {
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let pred = &pred;
            let value_ref = &value;
            self.data.par_chunks_mut(self.cols).for_each(|row| {
                for cell in row {
                    if pred(cell) {
                        *cell = (*value_ref).clone();
                    }
                }
            });
            return;
        }
        let _ = policy;
        for cell in &mut self.data {
            if pred(cell) {
                *cell = value.clone();
            }
        }
    }

    /// Overwrite every cell whose position matches `pred` with `value`.
    pub fn replace_if_indexed<P>(&mut self, pred: P, value: T)
    where
        P: Fn(usize, usize) -> bool + Sync,
    {
        self.replace_if_indexed_policy(&ParallelPolicy::new(), pred, value);
    }

    /// [`Matrix::replace_if_indexed`] with an explicit policy.
    pub fn replace_if_indexed_policy<P>(&mut self, policy: &ParallelPolicy, pred: P, value: T)
    where
        P: Fn(usize, usize) -> bool + Sync,
    {
        #[cfg(feature = "parallel")]
        if policy.should_parallelize(self.count, 1) {
            let pred = &pred;
            let value_ref = &value;
            let cols = self.cols;
            self.data
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(i, row)| {
                    for (j, cell) in row.iter_mut().enumerate() {
                        if pred(i, j) {
                            *cell = (*value_ref).clone();
                        }
                    }
                });
            return;
        }
        let _ = policy;
        match ParallelPolicy::choose_outer(self.rows, self.cols) {
            OuterDim::ByRow => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        if pred(i, j) {
                            self.data[i * self.cols + j] = value.clone();
                        }
                    }
                }
            }
            OuterDim::ByColumn => {
                for j in 0..self.cols {
                    for i in 0..self.rows {
                        if pred(i, j) {
                            self.data[i * self.cols + j] = value.clone();
                        }
                    }
                }
            }
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Copy `block` into this matrix starting at the top-left corner,
    /// silently clipping wherever the block overflows the bounds.
    pub fn fill_block(&mut self, block: &Matrix<T>) {
        self.fill_block_at(0, 0, block);
    }

    /// Copy `block` into this matrix starting at `(from_row, from_col)`.
    ///
    /// Cells of the block that would land outside the matrix are silently
    /// dropped; callers patch partial regions without bounds arithmetic.
    /// This clipping is a documented policy, not an error.
    pub fn fill_block_at(&mut self, from_row: usize, from_col: usize, block: &Matrix<T>) {
        let row_end = self.rows.min(from_row.saturating_add(block.rows));
        let col_end = self.cols.min(from_col.saturating_add(block.cols));
        for i in from_row..row_end {
            for j in from_col..col_end {
                let k = self.idx(i, j);
                self.data[k] = block.data[block.idx(i - from_row, j - from_col)].clone();
            }
        }
    }
}
