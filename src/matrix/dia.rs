//! Diagonal (DIA) source matrix

use ndarray::Array2;

use crate::error::{ConversionError, Result};
use crate::matrix::{DType, Element, ElementData, SourceFormat};

/// A sparse matrix in diagonal storage
///
/// `data` is an `(n_diagonals, diag_len)` block stored row-major: row `k`
/// holds the values of the diagonal at `offsets[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaMatrix {
    n_rows: usize,
    n_cols: usize,
    offsets: Vec<isize>,
    data: ElementData,
    diag_len: usize,
}

impl DiaMatrix {
    /// Creates a new DIA matrix from a flattened `(offsets.len(), diag_len)` block
    ///
    /// # Errors
    ///
    /// Returns `MalformedMatrix` if data does not hold exactly
    /// `offsets.len() * diag_len` values.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        offsets: Vec<isize>,
        data: impl Into<ElementData>,
        diag_len: usize,
    ) -> Result<Self> {
        let data = data.into();
        if data.len() != offsets.len() * diag_len {
            return Err(ConversionError::malformed(
                SourceFormat::Dia,
                format!(
                    "data holds {} values but {} diagonals of length {} were declared",
                    data.len(),
                    offsets.len(),
                    diag_len
                ),
            ));
        }

        Ok(Self {
            n_rows,
            n_cols,
            offsets,
            data,
            diag_len,
        })
    }

    /// Builds a DIA matrix from a `(n_diagonals, diag_len)` array
    pub fn from_array<T: Element>(
        shape: (usize, usize),
        offsets: Vec<isize>,
        data: Array2<T>,
    ) -> Result<Self> {
        if data.nrows() != offsets.len() {
            return Err(ConversionError::malformed(
                SourceFormat::Dia,
                format!(
                    "{} offsets but the data block has {} rows",
                    offsets.len(),
                    data.nrows()
                ),
            ));
        }
        let diag_len = data.ncols();
        let values: Vec<T> = data.iter().copied().collect();
        Self::new(shape.0, shape.1, offsets, T::into_data(values), diag_len)
    }

    /// A DIA matrix holding only the main diagonal
    pub fn main_diagonal(n: usize, values: impl Into<ElementData>) -> Result<Self> {
        let data = values.into();
        let diag_len = data.len();
        Self::new(n, n, vec![0], data, diag_len)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }

    pub fn n_diagonals(&self) -> usize {
        self.offsets.len()
    }

    pub fn diag_len(&self) -> usize {
        self.diag_len
    }

    pub fn data(&self) -> &ElementData {
        &self.data
    }
}
