//! Configuration for sparse matrix conversion

/// Default non-zero count above which lane sorting runs in parallel
pub const DEFAULT_PARALLEL_SORT_THRESHOLD: usize = 1 << 16;

/// Configuration for the format converters
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Sort compressed indices within each lane before reading them.
    /// Disabling this asserts the caller already sorted them.
    pub sort_indices: bool,

    /// Non-zero count above which lane sorting uses the rayon pool
    pub parallel_sort_threshold: usize,

    /// Emit `diag = "U"` for diagonal sources whose values are all one
    pub detect_unit_diagonal: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sort_indices: true,
            parallel_sort_threshold: DEFAULT_PARALLEL_SORT_THRESHOLD,
            detect_unit_diagonal: true,
        }
    }
}

impl ConversionConfig {
    /// A config that never sorts on the rayon pool
    pub fn serial() -> Self {
        Self {
            parallel_sort_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Whether a matrix with `nnz` stored entries should sort in parallel
    pub fn sort_in_parallel(&self, nnz: usize) -> bool {
        nnz > self.parallel_sort_threshold
    }
}
