//! Compressed Sparse Column (CSC) source matrix

use std::fmt;

use tracing::trace;

use crate::error::{ConversionError, Result};
use crate::matrix::sort::{lanes_sorted, sort_data_lanes};
use crate::matrix::{DType, ElementData, SourceFormat};

/// Checks the structural invariants shared by CSC and CSR storage
pub(crate) fn validate_compressed(
    format: SourceFormat,
    n_major: usize,
    n_minor: usize,
    indptr: &[usize],
    indices: &[usize],
    data_len: usize,
) -> Result<()> {
    if indptr.len() != n_major + 1 {
        return Err(ConversionError::malformed(
            format,
            format!("indptr has length {} but expected {}", indptr.len(), n_major + 1),
        ));
    }
    if indptr[0] != 0 || indptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(ConversionError::malformed(
            format,
            "indptr must start at 0 and be non-decreasing",
        ));
    }
    if indptr[n_major] != indices.len() {
        return Err(ConversionError::malformed(
            format,
            format!(
                "indptr ends at {} but there are {} indices",
                indptr[n_major],
                indices.len()
            ),
        ));
    }
    if indices.len() != data_len {
        return Err(ConversionError::malformed(
            format,
            "indices and data must have equal length",
        ));
    }
    if let Some(ix) = indices.iter().find(|&&ix| ix >= n_minor) {
        return Err(ConversionError::malformed(
            format,
            format!("index {ix} out of bounds (extent = {n_minor})"),
        ));
    }
    Ok(())
}

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// - indptr: Array of size n_cols + 1 containing offsets into indices and data
/// - indices: Array of size nnz containing the row index of each stored value
/// - data: Array of size nnz containing the stored values
#[derive(Clone, PartialEq)]
pub struct CscMatrix {
    n_rows: usize,
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: ElementData,
    has_sorted_indices: bool,
}

impl CscMatrix {
    /// Creates a new CSC matrix, validating the arrays against each other
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `indptr` - Column pointers
    /// * `indices` - Row indices, in any order within a column
    /// * `data` - Stored values of any supported element type
    ///
    /// # Errors
    ///
    /// Returns `MalformedMatrix` if the arrays are inconsistent:
    /// - indptr.len() must be n_cols + 1, start at 0 and never decrease
    /// - indptr[n_cols] must equal indices.len() and data.len()
    /// - every row index must be below n_rows
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: impl Into<ElementData>,
    ) -> Result<Self> {
        let data = data.into();
        validate_compressed(SourceFormat::Csc, n_cols, n_rows, &indptr, &indices, data.len())?;
        let has_sorted_indices = lanes_sorted(&indptr, &indices);

        Ok(Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
            has_sorted_indices,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of stored elements
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &ElementData {
        &self.data
    }

    pub fn has_sorted_indices(&self) -> bool {
        self.has_sorted_indices
    }

    /// Sorts row indices within each column, permuting data to match
    pub fn sort_indices(&mut self, parallel: bool) {
        if self.has_sorted_indices {
            trace!(nnz = self.nnz(), "csc indices already sorted");
            return;
        }
        trace!(nnz = self.nnz(), parallel, "sorting csc indices");
        sort_data_lanes(&self.indptr, &mut self.indices, &mut self.data, parallel);
        self.has_sorted_indices = true;
    }
}

impl fmt::Debug for CscMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CscMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  dtype: {}", self.dtype())?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        writeln!(f, "  sorted: {}", self.has_sorted_indices)?;
        write!(f, "}}")
    }
}
