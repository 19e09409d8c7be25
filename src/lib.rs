//! Dense row-major 2D matrices with cache-aware bulk kernels.
//!
//! `gridmat` provides a single generic [`Matrix<T>`] container backed by an
//! owned row-major buffer, together with the operations a dense grid needs in
//! practice: per-cell and [`Point`]-addressed access, neighbor queries,
//! diagonal access, bulk update/replace/map, geometric transforms (rotate,
//! transpose, flip, reshape, tile), stacking, elementwise combination, and a
//! family of lazy restartable iterators over row-major, column-major,
//! diagonal, row-of-rows and column-of-columns orderings.
//!
//! # Core Types
//!
//! - [`Matrix<T>`]: Owned rectangular grid, row-major storage
//! - [`Point`]: `(row, col)` index pair for alternate addressing and
//!   neighbor kernels
//! - [`ParallelPolicy`]: Decides once per bulk call whether to fan work out
//!   across rayon tasks, and which dimension a nested loop should keep outer
//!
//! # Value semantics
//!
//! Every shape transform (`transpose`, `rotate90`, `reshape`, `repmat`, ...)
//! returns a brand-new matrix with its own backing buffer; the source is
//! never touched. Only the in-place family (`set*`, `update*`, `replace_if*`,
//! `fill*`, `reverse_*`) mutates the owned buffer directly.
//!
//! # Parallelism
//!
//! With the `parallel` feature (default-on), bulk operations whose element
//! count exceeds [`PARALLEL_THRESHOLD`] fan out over disjoint destination
//! rows via rayon. Partitions never alias, so the library contains no locks
//! and no atomics, and results are bit-identical with or without the
//! parallel path.
//!
//! # Example
//!
//! ```rust
//! use gridmat::Matrix;
//!
//! let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! assert_eq!(m.rotate90(), Matrix::from_rows(vec![vec![3, 1], vec![4, 2]]).unwrap());
//! assert_eq!(m.get_lu2rd().unwrap(), vec![1, 4]);
//! let flat: Vec<i32> = m.stream_h().copied().collect();
//! assert_eq!(flat, vec![1, 2, 3, 4]);
//! ```

mod arith;
mod bulk;
mod diagonal;
mod matrix;
mod point;
mod policy;
pub mod shape;
mod stream;
mod transform;

pub use matrix::Matrix;
pub use point::Point;
pub use policy::{OuterDim, ParallelPolicy};
pub use stream::{ColIter, ColMajorIter, ColsIter, DiagIter, RowsIter};

// ============================================================================
// Constants
// ============================================================================

/// Element-count threshold above which bulk operations fan out across
/// rayon tasks (when the `parallel` feature is enabled and more than one
/// worker thread is available).
///
/// Work below this size is dominated by task spawn overhead and always runs
/// sequentially.
pub const PARALLEL_THRESHOLD: u64 = 8192;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during matrix construction or operations.
///
/// Every error is detected up front, before any mutation happens; a failing
/// call never leaves the matrix partially updated.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// Construction input is not rectangular.
    #[error("jagged input: row {row} has length {len}, expected {expected}")]
    Jagged {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A diagonal operation was called on a non-square matrix.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0}x{1} vs {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),

    /// Inner dimensions do not agree for a matrix product.
    #[error("inner dimensions do not agree: {0}x{1} * {2}x{3}")]
    DimMismatch(usize, usize, usize, usize),

    /// A supplied buffer has the wrong length for the target dimension.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A repeat factor of zero was passed to `repelem`/`repmat`.
    #[error("repeat factors must be positive: rows={0}, cols={1}")]
    NonPositiveRepeat(usize, usize),

    /// A half-open range violates `0 <= from <= to <= bound`.
    #[error("invalid range [{from}, {to}) for bound {bound}")]
    InvalidRange {
        from: usize,
        to: usize,
        bound: usize,
    },

    /// A single-cell access is out of bounds.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A row index is out of bounds.
    #[error("row {row} out of bounds for {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    /// A column index is out of bounds.
    #[error("column {col} out of bounds for {cols} columns")]
    ColOutOfBounds { col: usize, cols: usize },
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
