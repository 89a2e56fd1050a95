//! Format converters: one source format in, one foreign sparse class out
//!
//! | Source | Target class    | Slots                     |
//! |--------|-----------------|---------------------------|
//! | CSC    | `{tag}gCMatrix` | `i`, `p`, `x`, `Dim`      |
//! | CSR    | `{tag}gRMatrix` | `j`, `p`, `x`, `Dim`      |
//! | COO    | `{tag}gTMatrix` | `i`, `j`, `x`, `Dim`      |
//! | DIA    | `{tag}diMatrix` | `x`, `diag`, `Dim`        |
//!
//! `{tag}` is `d` for floating sources and `l` for boolean ones. The data
//! slot is always built with the constructor the dtype resolves to.

use tracing::debug;

use crate::context::Marshaller;
use crate::error::{ConversionError, Result};
use crate::matrix::{
    resolve, ConversionConfig, CooMatrix, CscMatrix, CsrMatrix, DiaMatrix, ElementData,
    SourceFormat, TypeConversion, TypeTag,
};
use crate::runtime::{ForeignRuntime, SexpVector, Slots};

/// Diagonal kind marker for a unit diagonal
pub const UNIT_DIAGONAL: &str = "U";

/// Diagonal kind marker for an explicitly stored diagonal
pub const NON_UNIT_DIAGONAL: &str = "N";

/// Name of the foreign class a source format converts to
pub fn target_class(format: SourceFormat, tag: TypeTag) -> String {
    let suffix = match format {
        SourceFormat::Csc => "gCMatrix",
        SourceFormat::Csr => "gRMatrix",
        SourceFormat::Coo => "gTMatrix",
        SourceFormat::Dia => "diMatrix",
    };
    format!("{tag}{suffix}")
}

fn slots<const N: usize>(entries: [(&str, SexpVector); N]) -> Slots {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Marshals a data array with the constructor its dtype resolved to
fn data_vector<R: ForeignRuntime>(
    m: &Marshaller<R>,
    conv: &TypeConversion,
    data: &ElementData,
) -> Result<SexpVector> {
    let native = data
        .as_native()
        .ok_or(ConversionError::UnsupportedElementType(data.dtype()))?;
    m.construct(conv.constructor(), native)
}

fn instantiate<R: ForeignRuntime>(
    m: &Marshaller<R>,
    class: &str,
    shape: (usize, usize),
    nnz: usize,
    slots: Slots,
) -> Result<R::Object> {
    debug!(class, rows = shape.0, cols = shape.1, nnz, "constructing foreign sparse matrix");
    m.runtime().new_instance(class, slots)
}

/// Converts a CSC matrix to `dgCMatrix` / `lgCMatrix`
///
/// Row indices are sorted within each column in place before they are read.
///
/// # Errors
///
/// - `UnsupportedElementType` if the dtype is neither floating nor boolean;
///   the matrix is left untouched
/// - `ValueOutOfRange` if an index or dimension exceeds the foreign integer width
/// - `InvalidSlot` if the foreign class rejects the slots
pub fn csc_to_foreign<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    csc: &mut CscMatrix,
) -> Result<R::Object> {
    let conv = resolve(csc.dtype())?;
    if config.sort_indices {
        csc.sort_indices(config.sort_in_parallel(csc.nnz()));
    }

    let class = target_class(SourceFormat::Csc, conv.tag);
    let slots = slots([
        ("i", m.as_integer(csc.indices())?),
        ("p", m.as_integer(csc.indptr())?),
        ("x", data_vector(m, &conv, csc.data())?),
        ("Dim", m.dim(csc.shape())?),
    ]);
    instantiate(m, &class, csc.shape(), csc.nnz(), slots)
}

/// Converts a CSR matrix to `dgRMatrix` / `lgRMatrix`
///
/// Column indices are sorted within each row in place before they are read.
///
/// # Errors
///
/// Same as [`csc_to_foreign`].
pub fn csr_to_foreign<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    csr: &mut CsrMatrix,
) -> Result<R::Object> {
    let conv = resolve(csr.dtype())?;
    if config.sort_indices {
        csr.sort_indices(config.sort_in_parallel(csr.nnz()));
    }

    let class = target_class(SourceFormat::Csr, conv.tag);
    let slots = slots([
        ("j", m.as_integer(csr.indices())?),
        ("p", m.as_integer(csr.indptr())?),
        ("x", data_vector(m, &conv, csr.data())?),
        ("Dim", m.dim(csr.shape())?),
    ]);
    instantiate(m, &class, csr.shape(), csr.nnz(), slots)
}

/// Converts a COO matrix to `dgTMatrix` / `lgTMatrix`
///
/// Entries are passed through in stored order; duplicates are kept.
///
/// # Errors
///
/// Same as [`csc_to_foreign`].
pub fn coo_to_foreign<R: ForeignRuntime>(
    m: &Marshaller<R>,
    _config: &ConversionConfig,
    coo: &CooMatrix,
) -> Result<R::Object> {
    let conv = resolve(coo.dtype())?;

    let class = target_class(SourceFormat::Coo, conv.tag);
    let slots = slots([
        ("i", m.as_integer(coo.row())?),
        ("j", m.as_integer(coo.col())?),
        ("x", data_vector(m, &conv, coo.data())?),
        ("Dim", m.dim(coo.shape())?),
    ]);
    instantiate(m, &class, coo.shape(), coo.nnz(), slots)
}

/// Converts a single-diagonal DIA matrix to `ddiMatrix` / `ldiMatrix`
///
/// Stored values that are all one (vacuously so when nothing is stored)
/// become a unit diagonal with an empty `x`.
///
/// # Errors
///
/// - `UnsupportedElementType` if the dtype is neither floating nor boolean,
///   checked before the diagonal count
/// - `TooManyDiagonals` if more than one offset is stored
/// - `InvalidSlot` if the foreign class rejects the result, e.g. a
///   non-square `Dim`
pub fn dia_to_foreign<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    dia: &DiaMatrix,
) -> Result<R::Object> {
    let conv = resolve(dia.dtype())?;
    if dia.n_diagonals() > 1 {
        return Err(ConversionError::TooManyDiagonals(dia.n_diagonals()));
    }

    let (x, diag) = if config.detect_unit_diagonal && dia.data().all_one() {
        (conv.empty_vector(), UNIT_DIAGONAL)
    } else {
        (data_vector(m, &conv, dia.data())?, NON_UNIT_DIAGONAL)
    };

    let class = target_class(SourceFormat::Dia, conv.tag);
    let nnz = x.len();
    let slots = slots([
        ("x", x),
        ("diag", SexpVector::string(diag)),
        ("Dim", m.dim(dia.shape())?),
    ]);
    instantiate(m, &class, dia.shape(), nnz, slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversionContext;
    use crate::matrix::DType;
    use crate::runtime::{MatrixPackageRuntime, RObject};
    use std::sync::Arc;

    fn with_marshaller<T>(f: impl FnOnce(&Marshaller<MatrixPackageRuntime>) -> T) -> T {
        let ctx = ConversionContext::new(Arc::new(MatrixPackageRuntime::new()));
        f(ctx.ensure().unwrap())
    }

    #[test]
    fn test_target_class_names() {
        assert_eq!(target_class(SourceFormat::Csc, TypeTag::Double), "dgCMatrix");
        assert_eq!(target_class(SourceFormat::Csr, TypeTag::Logical), "lgRMatrix");
        assert_eq!(target_class(SourceFormat::Coo, TypeTag::Double), "dgTMatrix");
        assert_eq!(target_class(SourceFormat::Dia, TypeTag::Logical), "ldiMatrix");
    }

    #[test]
    fn test_csc_end_to_end() {
        let mut csc =
            CscMatrix::new(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], vec![1.0, 2.0, 3.0]).unwrap();
        let obj: RObject =
            with_marshaller(|m| csc_to_foreign(m, &ConversionConfig::default(), &mut csc))
                .unwrap();

        assert_eq!(obj.class(), "dgCMatrix");
        assert_eq!(obj.slot("Dim"), Some(&SexpVector::Integer(vec![3, 3])));
        assert_eq!(obj.slot("i"), Some(&SexpVector::Integer(vec![0, 1, 2])));
        assert_eq!(obj.slot("p"), Some(&SexpVector::Integer(vec![0, 1, 2, 3])));
        assert_eq!(obj.slot("x"), Some(&SexpVector::Double(vec![1.0, 2.0, 3.0])));
    }

    #[test]
    fn test_boolean_csc_uses_logical_data() {
        let mut csc =
            CscMatrix::new(2, 2, vec![0, 1, 2], vec![1, 0], vec![true, false]).unwrap();
        let obj = with_marshaller(|m| csc_to_foreign(m, &ConversionConfig::default(), &mut csc))
            .unwrap();

        assert_eq!(obj.class(), "lgCMatrix");
        assert_eq!(
            obj.slot("x"),
            Some(&SexpVector::Logical(vec![Some(true), Some(false)]))
        );
    }

    #[test]
    fn test_csr_sorts_in_place() {
        let mut csr =
            CsrMatrix::new(1, 3, vec![0, 3], vec![2, 0, 1], vec![30.0, 10.0, 20.0]).unwrap();
        let obj = with_marshaller(|m| csr_to_foreign(m, &ConversionConfig::default(), &mut csr))
            .unwrap();

        assert_eq!(obj.slot("j"), Some(&SexpVector::Integer(vec![0, 1, 2])));
        assert_eq!(
            obj.slot("x"),
            Some(&SexpVector::Double(vec![10.0, 20.0, 30.0]))
        );
        assert!(csr.has_sorted_indices());
        assert_eq!(csr.indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_unsorted_without_normalization_is_rejected_downstream() {
        let mut csr = CsrMatrix::new(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 2.0]).unwrap();
        let config = ConversionConfig {
            sort_indices: false,
            ..ConversionConfig::default()
        };
        let err = with_marshaller(|m| csr_to_foreign(m, &config, &mut csr)).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidSlot { .. }));
    }

    #[test]
    fn test_coo_end_to_end() {
        let coo = CooMatrix::new(2, 2, vec![0, 1], vec![1, 0], vec![true, true]).unwrap();
        let obj = with_marshaller(|m| coo_to_foreign(m, &ConversionConfig::default(), &coo))
            .unwrap();

        assert_eq!(obj.class(), "lgTMatrix");
        assert_eq!(obj.slot("i"), Some(&SexpVector::Integer(vec![0, 1])));
        assert_eq!(obj.slot("j"), Some(&SexpVector::Integer(vec![1, 0])));
        assert_eq!(
            obj.slot("x"),
            Some(&SexpVector::Logical(vec![Some(true), Some(true)]))
        );
        assert_eq!(obj.dim(), Some((2, 2)));
    }

    #[test]
    fn test_dia_unit_diagonal() {
        let dia = DiaMatrix::main_diagonal(3, vec![1.0, 1.0, 1.0]).unwrap();
        let obj = with_marshaller(|m| dia_to_foreign(m, &ConversionConfig::default(), &dia))
            .unwrap();

        assert_eq!(obj.class(), "ddiMatrix");
        assert_eq!(obj.slot("diag"), Some(&SexpVector::string("U")));
        assert_eq!(obj.slot("x"), Some(&SexpVector::Double(vec![])));
    }

    #[test]
    fn test_dia_unit_detection_disabled() {
        let dia = DiaMatrix::main_diagonal(2, vec![true, true]).unwrap();
        let config = ConversionConfig {
            detect_unit_diagonal: false,
            ..ConversionConfig::default()
        };
        let obj = with_marshaller(|m| dia_to_foreign(m, &config, &dia)).unwrap();

        assert_eq!(obj.class(), "ldiMatrix");
        assert_eq!(obj.slot("diag"), Some(&SexpVector::string("N")));
        assert_eq!(
            obj.slot("x"),
            Some(&SexpVector::Logical(vec![Some(true), Some(true)]))
        );
    }

    #[test]
    fn test_dia_without_diagonals_is_unit() {
        let dia = DiaMatrix::new(3, 3, vec![], Vec::<f64>::new(), 0).unwrap();
        let obj = with_marshaller(|m| dia_to_foreign(m, &ConversionConfig::default(), &dia))
            .unwrap();

        assert_eq!(obj.class(), "ddiMatrix");
        assert_eq!(obj.slot("diag"), Some(&SexpVector::string("U")));
        assert_eq!(obj.slot("x"), Some(&SexpVector::Double(vec![])));
        assert_eq!(obj.dim(), Some((3, 3)));
    }

    #[test]
    fn test_dia_rejects_two_diagonals() {
        let dia = DiaMatrix::new(2, 2, vec![0, 1], vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let err = with_marshaller(|m| dia_to_foreign(m, &ConversionConfig::default(), &dia))
            .unwrap_err();
        assert_eq!(err, ConversionError::TooManyDiagonals(2));
    }

    #[test]
    fn test_unsupported_dtype_leaves_source_untouched() {
        let mut csc = CscMatrix::new(2, 1, vec![0, 2], vec![1, 0], vec![5i64, 6]).unwrap();
        let before = csc.clone();
        let err = with_marshaller(|m| csc_to_foreign(m, &ConversionConfig::default(), &mut csc))
            .unwrap_err();

        assert_eq!(err, ConversionError::UnsupportedElementType(DType::Int64));
        assert_eq!(csc, before);
    }
}
