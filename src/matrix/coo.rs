//! Coordinate (COO) source matrix

use crate::error::{ConversionError, Result};
use crate::matrix::{DType, ElementData, SourceFormat};

/// A sparse matrix in coordinate format: parallel row, column and value
/// arrays with no ordering requirement
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    n_rows: usize,
    n_cols: usize,
    row: Vec<usize>,
    col: Vec<usize>,
    data: ElementData,
}

impl CooMatrix {
    /// Creates a new COO matrix from parallel coordinate and value arrays
    ///
    /// # Errors
    ///
    /// Returns `MalformedMatrix` if row, col and data differ in length or an
    /// entry lies outside the `n_rows × n_cols` shape.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row: Vec<usize>,
        col: Vec<usize>,
        data: impl Into<ElementData>,
    ) -> Result<Self> {
        let data = data.into();
        if row.len() != data.len() || col.len() != data.len() {
            return Err(ConversionError::malformed(
                SourceFormat::Coo,
                "row/col/data must have equal length",
            ));
        }
        let out_of_bounds = row
            .iter()
            .zip(&col)
            .find(|&(&i, &j)| i >= n_rows || j >= n_cols);
        if let Some((i, j)) = out_of_bounds {
            return Err(ConversionError::malformed(
                SourceFormat::Coo,
                format!("entry ({i}, {j}) outside a {n_rows} × {n_cols} matrix"),
            ));
        }

        Ok(Self {
            n_rows,
            n_cols,
            row,
            col,
            data,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn row(&self) -> &[usize] {
        &self.row
    }

    pub fn col(&self) -> &[usize] {
        &self.col
    }

    pub fn data(&self) -> &ElementData {
        &self.data
    }
}
