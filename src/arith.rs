//! Numeric elementwise arithmetic and matrix multiplication.
//!
//! These operations are gated on `T: Copy + Num` instead of being duplicated
//! per primitive element type; overflow behavior is whatever the element
//! type's `+`/`-`/`*` do.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use num_traits::Num;

use crate::policy::ParallelPolicy;
use crate::{Matrix, MatrixError, Result};

impl<T: Copy + Num + Send + Sync> Matrix<T> {
    /// Elementwise sum; shapes must match.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.add_policy(&ParallelPolicy::new(), other)
    }

    /// [`Matrix::add`] with an explicit policy.
    pub fn add_policy(&self, policy: &ParallelPolicy, other: &Self) -> Result<Self> {
        self.zip_with_policy(policy, other, |&a, &b| a + b)
    }

    /// Elementwise difference; shapes must match.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.subtract_policy(&ParallelPolicy::new(), other)
    }

    /// [`Matrix::subtract`] with an explicit policy.
    pub fn subtract_policy(&self, policy: &ParallelPolicy, other: &Self) -> Result<Self> {
        self.zip_with_policy(policy, other, |&a, &b| a - b)
    }

    /// Conventional matrix product; requires `self.cols == other.rows`.
    ///
    /// The kernel runs i-k-j so every inner access walks a contiguous
    /// row-major row; the parallel path fans out over disjoint rows of the
    /// output with the inner-product length as the branching factor.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.multiply_policy(&ParallelPolicy::new(), other)
    }

    /// [`Matrix::multiply`] with an explicit policy.
    pub fn multiply_policy(&self, policy: &ParallelPolicy, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(MatrixError::DimMismatch(
                self.rows, self.cols, other.rows, other.cols,
            ));
        }
        let (n, inner, m) = (self.rows, self.cols, other.cols);
        if n == 0 || m == 0 {
            return Ok(Self::empty());
        }
        let mut out = vec![T::zero(); n * m];

        #[cfg(feature = "parallel")]
        if policy.should_parallelize(n as u64 * m as u64, inner as u64) {
            out.par_chunks_mut(m).enumerate().for_each(|(i, out_row)| {
                for k in 0..inner {
                    let a = self.data[i * inner + k];
                    let b_row = &other.data[k * m..(k + 1) * m];
                    for (o, &b) in out_row.iter_mut().zip(b_row) {
                        *o = *o + a * b;
                    }
                }
            });
            return Ok(Self::from_parts(n, m, out));
        }
        let _ = policy;

        for i in 0..n {
            let out_row = &mut out[i * m..(i + 1) * m];
            for k in 0..inner {
                let a = self.data[i * inner + k];
                let b_row = &other.data[k * m..(k + 1) * m];
                for (o, &b) in out_row.iter_mut().zip(b_row) {
                    *o = *o + a * b;
                }
            }
        }
        Ok(Self::from_parts(n, m, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m2x2() -> Matrix<i32> {
        Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap()
    }

    #[test]
    fn add_and_subtract_elementwise() {
        let a = m2x2();
        let b = Matrix::repeat(2, 2, 10);
        assert_eq!(a.add(&b).unwrap().flatten(), vec![11, 12, 13, 14]);
        assert_eq!(a.subtract(&b).unwrap().flatten(), vec![-9, -8, -7, -6]);
        let bad = Matrix::from_rows(vec![vec![1, 2, 3]]).unwrap();
        assert!(a.add(&bad).is_err());
    }

    #[test]
    fn multiply_is_matrix_product() {
        let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let b = Matrix::from_rows(vec![vec![7, 8], vec![9, 10], vec![11, 12]]).unwrap();
        let p = a.multiply(&b).unwrap();
        assert_eq!(
            p,
            Matrix::from_rows(vec![vec![58, 64], vec![139, 154]]).unwrap()
        );
    }

    #[test]
    fn multiply_by_identity_is_identity_map() {
        let a = m2x2();
        let i = Matrix::<i32>::identity(2);
        assert_eq!(a.multiply(&i).unwrap(), a);
        assert_eq!(i.multiply(&a).unwrap(), a);
    }

    #[test]
    fn multiply_checks_inner_dims() {
        let a = m2x2();
        let b = Matrix::from_rows(vec![vec![1, 2]]).unwrap();
        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::DimMismatch(2, 2, 1, 2))
        ));
    }

    #[test]
    fn multiply_forced_parallel_matches_sequential() {
        let a = Matrix::range(17, 31, 1i64);
        let b = Matrix::range(31, 13, -4i64);
        let seq = a
            .multiply_policy(&ParallelPolicy::sequential(), &b)
            .unwrap();
        let par = a
            .multiply_policy(&ParallelPolicy::new().with_threshold(0), &b)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn float_add_forced_parallel_is_bit_identical() {
        let a = Matrix::from_fn(23, 19, |i, j| (i as f64 + 1.0) / (j as f64 + 1.5));
        let b = Matrix::from_fn(23, 19, |i, j| (j as f64 - 2.0) * (i as f64 + 0.5));
        let seq = a.add_policy(&ParallelPolicy::sequential(), &b).unwrap();
        let par = a
            .add_policy(&ParallelPolicy::new().with_threshold(0), &b)
            .unwrap();
        assert_eq!(seq.flatten(), par.flatten());
    }
}
