// Source matrix data structures

pub mod config;
pub mod coo;
pub mod csc;
pub mod csr;
pub mod dia;
pub mod dtype;
pub mod sort;
pub mod source;

pub use config::ConversionConfig;
pub use coo::CooMatrix;
pub use csc::CscMatrix;
pub use csr::CsrMatrix;
pub use dia::DiaMatrix;
pub use dtype::{resolve, DType, Element, ElementData, TypeConversion, TypeTag};
pub use source::{RawSparse, SourceFormat, SourceMatrix};
