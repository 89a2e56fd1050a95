//! Compressed Sparse Row (CSR) source matrix

use std::fmt;

use tracing::trace;

use crate::error::Result;
use crate::matrix::csc::validate_compressed;
use crate::matrix::sort::{lanes_sorted, sort_data_lanes};
use crate::matrix::{DType, ElementData, SourceFormat};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// - indptr: Array of size n_rows + 1 containing offsets into indices and data
/// - indices: Array of size nnz containing the column index of each stored value
/// - data: Array of size nnz containing the stored values
#[derive(Clone, PartialEq)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: ElementData,
    has_sorted_indices: bool,
}

impl CsrMatrix {
    /// Creates a new CSR matrix, validating the arrays against each other
    ///
    /// # Errors
    ///
    /// Returns `MalformedMatrix` if the arrays are inconsistent:
    /// - indptr.len() must be n_rows + 1, start at 0 and never decrease
    /// - indptr[n_rows] must equal indices.len() and data.len()
    /// - every column index must be below n_cols
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: impl Into<ElementData>,
    ) -> Result<Self> {
        let data = data.into();
        validate_compressed(SourceFormat::Csr, n_rows, n_cols, &indptr, &indices, data.len())?;
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

    /// Sorts column indices within each row, permuting data to match
    pub fn sort_indices(&mut self, parallel: bool) {
        if self.has_sorted_indices {
            trace!(nnz = self.nnz(), "csr indices already sorted");
            return;
        }
        trace!(nnz = self.nnz(), parallel, "sorting csr indices");
        sort_data_lanes(&self.indptr, &mut self.indices, &mut self.data, parallel);
        self.has_sorted_indices = true;
    }
}

impl fmt::Debug for CsrMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  dtype: {}", self.dtype())?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        writeln!(f, "  sorted: {}", self.has_sorted_indices)?;
        write!(f, "}}")
    }
}
