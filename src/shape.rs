//! Pure shape validators.
//!
//! Every operation whose preconditions depend on shape calls one of these
//! at entry, before touching any data. The checks are deterministic and
//! side-effect free; on failure the offending call returns immediately with
//! no partial mutation.

use crate::{MatrixError, Result};

/// Ensure every row of a nested-vec construction input has the same length
/// as the first row.
pub fn check_rectangular<T>(rows: &[Vec<T>]) -> Result<()> {
    let expected = rows.first().map_or(0, Vec::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(MatrixError::Jagged {
                row: i,
                len: row.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Ensure a matrix is square. Required by all diagonal accessors, mutators
/// and streams.
pub fn check_square(rows: usize, cols: usize) -> Result<()> {
    if rows != cols {
        return Err(MatrixError::NonSquare { rows, cols });
    }
    Ok(())
}

/// Ensure two operands have identical dimensions.
pub fn check_same_shape(a_rows: usize, a_cols: usize, b_rows: usize, b_cols: usize) -> Result<()> {
    if (a_rows, a_cols) != (b_rows, b_cols) {
        return Err(MatrixError::ShapeMismatch(a_rows, a_cols, b_rows, b_cols));
    }
    Ok(())
}

/// Ensure a half-open range satisfies `from <= to <= bound`.
pub fn check_range(from: usize, to: usize, bound: usize) -> Result<()> {
    if from > to || to > bound {
        return Err(MatrixError::InvalidRange { from, to, bound });
    }
    Ok(())
}

/// Ensure a single-cell index is inside the grid.
pub fn check_index(row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
    if row >= rows || col >= cols {
        return Err(MatrixError::IndexOutOfBounds {
            row,
            col,
            rows,
            cols,
        });
    }
    Ok(())
}

/// Ensure a row index is inside the grid.
pub fn check_row(row: usize, rows: usize) -> Result<()> {
    if row >= rows {
        return Err(MatrixError::RowOutOfBounds { row, rows });
    }
    Ok(())
}

/// Ensure a column index is inside the grid.
pub fn check_col(col: usize, cols: usize) -> Result<()> {
    if col >= cols {
        return Err(MatrixError::ColOutOfBounds { col, cols });
    }
    Ok(())
}
