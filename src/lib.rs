//! # sparse2ri: sparse matrices into the Matrix class hierarchy
//!
//! This crate converts in-memory sparse matrices in compressed-sparse-column,
//! compressed-sparse-row, coordinate and diagonal storage into instances of
//! the foreign Matrix package's sparse classes.
//!
//! ## Overview
//!
//! | Source | Float target | Boolean target |
//! |--------|--------------|----------------|
//! | CSC    | `dgCMatrix`  | `lgCMatrix`    |
//! | CSR    | `dgRMatrix`  | `lgRMatrix`    |
//! | COO    | `dgTMatrix`  | `lgTMatrix`    |
//! | DIA    | `ddiMatrix`  | `ldiMatrix`    |
//!
//! The conversion is structural: index and pointer arrays are marshalled to
//! foreign integer vectors, the data array to a double or logical vector
//! depending on the source dtype, and the shape to the `Dim` slot. No
//! arithmetic is performed on the values.
//!
//! ## Components
//!
//! 1. **Type-tag resolution** ([`matrix::resolve`]): dtype → `d` / `l`.
//! 2. **Marshalling** ([`context`]): one-time import of the class
//!    definitions, then native buffers → foreign typed vectors.
//! 3. **Format converters** ([`convert`]): one per source format.
//! 4. **Dispatch** ([`MatrixConverter`]): exhaustive match over
//!    [`SourceMatrix`].
//!
//! The foreign side is abstracted by [`ForeignRuntime`];
//! [`MatrixPackageRuntime`] implements it in-process with the class
//! definitions and validity rules of the eight target classes.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use sparse2ri::{CscMatrix, MatrixConverter, MatrixPackageRuntime, SexpVector};
//!
//! let converter = MatrixConverter::new(Arc::new(MatrixPackageRuntime::new()));
//!
//! let csc = CscMatrix::new(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], vec![1.0, 2.0, 3.0]).unwrap();
//! let obj = converter.convert_owned(csc).unwrap();
//!
//! assert_eq!(obj.class(), "dgCMatrix");
//! assert_eq!(obj.slot("Dim"), Some(&SexpVector::Integer(vec![3, 3])));
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod matrix;
pub mod registry;
pub mod runtime;
pub mod utils;

// Re-export primary components
pub use context::{ConversionContext, Marshaller};
pub use error::{ConversionError, Result};
pub use matrix::{
    resolve, ConversionConfig, CooMatrix, CscMatrix, CsrMatrix, DType, DiaMatrix, ElementData,
    RawSparse, SourceFormat, SourceMatrix, TypeConversion, TypeTag,
};
pub use registry::{Converter, MatrixConverter};
pub use runtime::{ForeignRuntime, MatrixPackageRuntime, NativeArray, RObject, SexpVector, VectorKind};
pub use utils::{from_sprs, from_sprs_triplets};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
