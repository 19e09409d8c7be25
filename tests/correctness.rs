use approx::assert_relative_eq;
use gridmat::{Matrix, MatrixError, ParallelPolicy, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn int_matrix(rows: usize, cols: usize, seed: u64) -> Matrix<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-1000..1000))
}

// ============================================================================
// Shape invariants
// ============================================================================

#[test]
fn count_matches_dimensions() {
    for (r, c) in [(1, 1), (3, 7), (128, 2), (0, 5), (4, 0)] {
        let m = Matrix::repeat(r, c, 0u8);
        assert_eq!(m.count(), m.rows() as u64 * m.cols() as u64);
        for i in 0..m.rows() {
            assert_eq!(m.row(i).unwrap().len(), m.cols());
        }
    }
}

#[test]
fn empty_is_normalized() {
    let a = Matrix::<i32>::from_rows(vec![]).unwrap();
    let b = Matrix::repeat(0, 17, 1);
    let c = Matrix::repeat(17, 0, 1);
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(c.rows(), 0);
    assert_eq!(c.cols(), 0);
}

// ============================================================================
// Transform algebra
// ============================================================================

#[test]
fn transpose_is_an_involution() {
    for (r, c) in [(1, 1), (2, 3), (5, 5), (7, 2)] {
        let m = int_matrix(r, c, 11);
        assert_eq!(m.transpose().transpose(), m);
    }
}

#[test]
fn four_quarter_turns_are_identity() {
    let m = int_matrix(5, 8, 22);
    assert_eq!(m.rotate90().rotate90().rotate90().rotate90(), m);
    assert_eq!(m.rotate180(), m.rotate90().rotate90());
    assert_eq!(m.rotate270(), m.rotate180().rotate90());
}

#[test]
fn flatten_reshape_round_trip() {
    let m = int_matrix(6, 7, 33);
    assert_eq!(m.reshape(6, 7).flatten(), m.flatten());
    assert_eq!(m.reshape(7, 6).flatten(), m.flatten());
    assert_eq!(m.reshape(42, 1).flatten(), m.flatten());
}

#[test]
fn zip_with_identity_is_identity() {
    let m = int_matrix(9, 4, 44);
    assert_eq!(m.zip_with(&m, |a, _| *a).unwrap(), m);
}

// ============================================================================
// Parallel/sequential equivalence
// ============================================================================

#[test]
fn bulk_ops_are_policy_independent() {
    let seq = ParallelPolicy::sequential();
    let par = ParallelPolicy::new().with_threshold(0);

    let a = int_matrix(61, 47, 55);
    let b = int_matrix(61, 47, 66);

    assert_eq!(a.add_policy(&seq, &b).unwrap(), a.add_policy(&par, &b).unwrap());
    assert_eq!(
        a.subtract_policy(&seq, &b).unwrap(),
        a.subtract_policy(&par, &b).unwrap()
    );
    assert_eq!(
        a.map_policy(&seq, |v| v.wrapping_mul(31)),
        a.map_policy(&par, |v| v.wrapping_mul(31))
    );
    assert_eq!(
        a.zip_with_policy(&seq, &b, |x, y| x.max(y).wrapping_sub(1)).unwrap(),
        a.zip_with_policy(&par, &b, |x, y| x.max(y).wrapping_sub(1)).unwrap()
    );

    let mut x = a.clone();
    let mut y = a.clone();
    x.update_all_indexed_policy(&seq, |i, j| (i * 1009 + j) as i64);
    y.update_all_indexed_policy(&par, |i, j| (i * 1009 + j) as i64);
    assert_eq!(x, y);

    let c = int_matrix(47, 23, 88);
    let seq_prod = a.multiply_policy(&seq, &c).unwrap();
    let par_prod = a.multiply_policy(&par, &c).unwrap();
    assert_eq!(seq_prod, par_prod);
    assert_eq!(seq_prod.rows(), 61);
    assert_eq!(seq_prod.cols(), 23);
}

#[test]
fn float_kernels_are_bit_identical_across_policies() {
    let seq = ParallelPolicy::sequential();
    let par = ParallelPolicy::new().with_threshold(0);
    let mut rng = StdRng::seed_from_u64(99);
    let a: Matrix<f64> = Matrix::from_fn(40, 33, |_, _| rng.gen::<f64>() * 2.0 - 1.0);
    let b: Matrix<f64> = Matrix::from_fn(40, 33, |_, _| rng.gen::<f64>() * 2.0 - 1.0);

    let s = a.add_policy(&seq, &b).unwrap();
    let p = a.add_policy(&par, &b).unwrap();
    // Bit-identical, not merely close.
    for (x, y) in s.stream_h().zip(p.stream_h()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn scenario_rotate90() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(
        m.rotate90(),
        Matrix::from_rows(vec![vec![3, 1], vec![4, 2]]).unwrap()
    );
}

#[test]
fn scenario_transpose() {
    let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(
        m.transpose(),
        Matrix::from_rows(vec![vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap()
    );
}

#[test]
fn scenario_diagonals() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(m.get_lu2rd().unwrap(), vec![1, 4]);
    assert_eq!(m.get_ru2ld().unwrap(), vec![2, 3]);
}

#[test]
fn scenario_extend() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(
        m.extend(3, 3, 0),
        Matrix::from_rows(vec![vec![1, 2, 0], vec![3, 4, 0], vec![0, 0, 0]]).unwrap()
    );
}

#[test]
fn scenario_vstack() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let extra = Matrix::from_rows(vec![vec![5, 6]]).unwrap();
    assert_eq!(
        m.vstack(&extra).unwrap(),
        Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap()
    );
    let mismatched = Matrix::from_rows(vec![vec![5, 6, 7]]).unwrap();
    assert!(matches!(
        m.vstack(&mismatched),
        Err(MatrixError::ShapeMismatch(..))
    ));
}

#[test]
fn scenario_bool_stream_h() {
    let m = Matrix::from_rows(vec![vec![true, false], vec![false, true]]).unwrap();
    let flat: Vec<bool> = m.stream_h().copied().collect();
    assert_eq!(flat, vec![true, false, false, true]);
}

// ============================================================================
// Cross-cutting behavior
// ============================================================================

#[test]
fn transforms_never_mutate_the_source() {
    let m = int_matrix(4, 5, 123);
    let before = m.clone();
    let _ = m.transpose();
    let _ = m.rotate90();
    let _ = m.reshape(2, 10);
    let _ = m.repelem(2, 3).unwrap();
    let _ = m.repmat(2, 2).unwrap();
    let _ = m.extend(6, 6, 0);
    let _ = m.flip_h();
    let _ = m.map(|v| v + 1);
    assert_eq!(m, before);
}

#[test]
fn fail_fast_means_no_partial_mutation() {
    let mut m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let before = m.clone();
    assert!(m.set_row(0, &[1, 2]).is_err());
    assert!(m.set_column(5, &[1, 2]).is_err());
    assert!(m.set_lu2rd(&[1, 2]).is_err()); // non-square
    assert!(m.set(9, 0, 0).is_err());
    assert_eq!(m, before);
}

#[test]
fn point_addressing_matches_pair_addressing() {
    let m = int_matrix(6, 6, 7);
    for i in 0..6 {
        for j in 0..6 {
            assert_eq!(m.get(i, j).unwrap(), m.get_at(Point::new(i, j)).unwrap());
        }
    }
}

#[test]
fn map_to_boxes_into_domain_objects() {
    #[derive(Debug, PartialEq)]
    struct Cell {
        live: bool,
    }
    let grid = Matrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
    let cells = grid.map_to(|&v| Cell { live: v == 1 });
    assert_eq!(cells.rows(), 2);
    assert_eq!(*cells.get(0, 1).unwrap(), Cell { live: true });
}

#[test]
fn float_multiply_against_hand_computed() {
    let a = Matrix::from_rows(vec![vec![0.5f64, 1.5], vec![-2.0, 0.25]]).unwrap();
    let b = Matrix::from_rows(vec![vec![4.0f64, 0.0], vec![2.0, -1.0]]).unwrap();
    let p = a.multiply(&b).unwrap();
    assert_relative_eq!(*p.get(0, 0).unwrap(), 5.0, epsilon = 1e-12);
    assert_relative_eq!(*p.get(0, 1).unwrap(), -1.5, epsilon = 1e-12);
    assert_relative_eq!(*p.get(1, 0).unwrap(), -7.5, epsilon = 1e-12);
    assert_relative_eq!(*p.get(1, 1).unwrap(), -0.25, epsilon = 1e-12);
}
