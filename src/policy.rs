//! Parallel execution policy for bulk operations.
//!
//! Every bulk operation consults a [`ParallelPolicy`] exactly once at entry
//! and then commits to either a sequential nested loop or a one-task-per-row
//! rayon fan-out. Tasks write only to disjoint destination rows, so the
//! parallel path needs no locks and produces bit-identical results to the
//! sequential one.

use crate::PARALLEL_THRESHOLD;

/// Which dimension a nested loop should keep outer.
///
/// Keeping the smaller dimension outer minimizes the number of tasks spawned
/// while each task's inner loop runs over the longer dimension sequentially.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OuterDim {
    ByRow,
    ByColumn,
}

/// Decides whether a bulk operation is worth partitioning across threads.
///
/// The capability flag is captured at construction time (the `parallel`
/// feature compiled in and more than one rayon worker available) and is not
/// re-checked per call.
#[derive(Clone, Copy, Debug)]
pub struct ParallelPolicy {
    capable: bool,
    threshold: u64,
}

impl ParallelPolicy {
    /// Policy reflecting the current environment, with the default
    /// [`PARALLEL_THRESHOLD`].
    pub fn new() -> Self {
        #[cfg(feature = "parallel")]
        let capable = rayon::current_num_threads() > 1;
        #[cfg(not(feature = "parallel"))]
        let capable = false;
        Self {
            capable,
            threshold: PARALLEL_THRESHOLD,
        }
    }

    /// Policy that never parallelizes, regardless of environment.
    pub fn sequential() -> Self {
        Self {
            capable: false,
            threshold: PARALLEL_THRESHOLD,
        }
    }

    /// Replace the element-count threshold. A threshold of zero makes every
    /// non-empty bulk operation take the parallel path (when capable), which
    /// is how the equivalence tests force both code paths.
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Whether this policy can ever choose the parallel path.
    pub fn is_capable(&self) -> bool {
        self.capable
    }

    /// True iff `total_elements * branching_factor` exceeds the threshold
    /// and a parallel executor is available.
    ///
    /// `branching_factor` accounts for per-element work beyond O(1), e.g.
    /// the inner-product length of a matrix multiplication.
    pub fn should_parallelize(&self, total_elements: u64, branching_factor: u64) -> bool {
        self.capable && total_elements.saturating_mul(branching_factor) > self.threshold
    }

    /// Pick the outer dimension for a nested loop over a `rows x cols` grid:
    /// `ByRow` when `rows <= cols`, else `ByColumn`.
    pub fn choose_outer(rows: usize, cols: usize) -> OuterDim {
        if rows <= cols {
            OuterDim::ByRow
        } else {
            OuterDim::ByColumn
        }
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self::new()
    }
}
