//! Utilities for bringing sprs matrices into the conversion pipeline

use sprs::{CsMat, TriMat};

use crate::error::Result;
use crate::matrix::{CooMatrix, CscMatrix, CsrMatrix, Element, SourceMatrix};

/// Converts a sprs `CsMat` into a CSC or CSR source, following its storage
pub fn from_sprs<N: Element>(matrix: CsMat<N>) -> Result<SourceMatrix> {
    let is_csc = matrix.is_csc();
    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();
    let data = N::into_data(data);

    if is_csc {
        Ok(SourceMatrix::Csc(CscMatrix::new(n_rows, n_cols, indptr, indices, data)?))
    } else {
        Ok(SourceMatrix::Csr(CsrMatrix::new(n_rows, n_cols, indptr, indices, data)?))
    }
}

/// Converts a sprs triplet matrix into a COO source
pub fn from_sprs_triplets<N: Element>(matrix: &TriMat<N>) -> Result<SourceMatrix> {
    let (n_rows, n_cols) = matrix.shape();
    let coo = CooMatrix::new(
        n_rows,
        n_cols,
        matrix.row_inds().to_vec(),
        matrix.col_inds().to_vec(),
        N::into_data(matrix.data().to_vec()),
    )?;
    Ok(SourceMatrix::Coo(coo))
}
