//! Element types of source matrices and the foreign type tag they map to

use std::fmt;

use num_traits::One;

use crate::error::{ConversionError, Result};
use crate::runtime::{NativeArray, SexpVector, VectorKind};

/// Element type carried by a source matrix's data array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Float32,
    Bool,
    Int32,
    Int64,
    Complex128,
}

impl DType {
    /// Whether this dtype is a floating-point type
    pub fn is_floating(&self) -> bool {
        matches!(self, DType::Float64 | DType::Float32)
    }

    /// Whether this dtype is the boolean type
    pub fn is_bool(&self) -> bool {
        matches!(self, DType::Bool)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Bool => "bool",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dtype('{}')", self.name())
    }
}

/// One-character format tag prefixed to the foreign class name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `d`: double precision numeric
    Double,
    /// `l`: logical
    Logical,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Double => "d",
            TypeTag::Logical => "l",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving a dtype: the class tag plus the foreign element kind
/// used both as data constructor and as the empty-vector type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeConversion {
    pub tag: TypeTag,
    pub kind: VectorKind,
}

impl TypeConversion {
    /// Element kind the data field is coerced to
    pub fn constructor(&self) -> VectorKind {
        self.kind
    }

    /// A zero-length vector of the resolved type
    pub fn empty_vector(&self) -> SexpVector {
        SexpVector::empty(self.kind)
    }
}

/// Maps a source dtype to its type tag and foreign element kind
///
/// Floating dtypes resolve to `d` with double vectors, booleans to `l`
/// with logical vectors. Every other dtype is rejected.
pub fn resolve(dtype: DType) -> Result<TypeConversion> {
    if dtype.is_floating() {
        Ok(TypeConversion {
            tag: TypeTag::Double,
            kind: VectorKind::Double,
        })
    } else if dtype.is_bool() {
        Ok(TypeConversion {
            tag: TypeTag::Logical,
            kind: VectorKind::Logical,
        })
    } else {
        Err(ConversionError::UnsupportedElementType(dtype))
    }
}

/// Data array of a source matrix, one variant per dtype
#[derive(Debug, Clone, PartialEq)]
pub enum ElementData {
    Float64(Vec<f64>),
    Float32(Vec<f32>),
    Bool(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    /// Interleaved (re, im) pairs
    Complex128(Vec<[f64; 2]>),
}

/// Rust scalar types that can populate an [`ElementData`]
pub trait Element: Copy + Send + Sync + 'static {
    const DTYPE: DType;

    fn into_data(values: Vec<Self>) -> ElementData;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$variant;

            fn into_data(values: Vec<Self>) -> ElementData {
                ElementData::$variant(values)
            }
        }

        impl From<Vec<$ty>> for ElementData {
            fn from(values: Vec<$ty>) -> Self {
                ElementData::$variant(values)
            }
        }
    };
}

impl_element!(f64, Float64);
impl_element!(f32, Float32);
impl_element!(bool, Bool);
impl_element!(i32, Int32);
impl_element!(i64, Int64);
impl_element!([f64; 2], Complex128);

fn all_one<T: One + PartialEq>(values: &[T]) -> bool {
    values.iter().all(One::is_one)
}

impl ElementData {
    pub fn dtype(&self) -> DType {
        match self {
            ElementData::Float64(_) => DType::Float64,
            ElementData::Float32(_) => DType::Float32,
            ElementData::Bool(_) => DType::Bool,
            ElementData::Int32(_) => DType::Int32,
            ElementData::Int64(_) => DType::Int64,
            ElementData::Complex128(_) => DType::Complex128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ElementData::Float64(v) => v.len(),
            ElementData::Float32(v) => v.len(),
            ElementData::Bool(v) => v.len(),
            ElementData::Int32(v) => v.len(),
            ElementData::Int64(v) => v.len(),
            ElementData::Complex128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every stored value equals one (vacuously true when empty)
    pub fn all_one(&self) -> bool {
        match self {
            ElementData::Float64(v) => all_one(v),
            ElementData::Float32(v) => all_one(v),
            ElementData::Bool(v) => v.iter().all(|&b| b),
            ElementData::Int32(v) => all_one(v),
            ElementData::Int64(v) => all_one(v),
            ElementData::Complex128(v) => v.iter().all(|c| c[0] == 1.0 && c[1] == 0.0),
        }
    }

    /// Borrows the data as a native array for marshalling
    ///
    /// Returns `None` for dtypes the foreign runtime has no vector for.
    pub fn as_native(&self) -> Option<NativeArray<'_>> {
        match self {
            ElementData::Float64(v) => Some(NativeArray::Float64(v)),
            ElementData::Float32(v) => Some(NativeArray::Float32(v)),
            ElementData::Bool(v) => Some(NativeArray::Bool(v)),
            ElementData::Int32(v) => Some(NativeArray::Int32(v)),
            ElementData::Int64(v) => Some(NativeArray::Int64(v)),
            ElementData::Complex128(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_floating() {
        for dtype in [DType::Float64, DType::Float32] {
            let conv = resolve(dtype).unwrap();
            assert_eq!(conv.tag.as_str(), "d");
            assert_eq!(conv.constructor(), VectorKind::Double);
            assert_eq!(conv.empty_vector(), SexpVector::Double(vec![]));
        }
    }

    #[test]
    fn test_resolve_bool() {
        let conv = resolve(DType::Bool).unwrap();
        assert_eq!(conv.tag.as_str(), "l");
        assert_eq!(conv.constructor(), VectorKind::Logical);
        assert_eq!(conv.empty_vector(), SexpVector::Logical(vec![]));
    }

    #[test]
    fn test_resolve_rejects_other_dtypes() {
        for dtype in [DType::Int32, DType::Int64, DType::Complex128] {
            assert_eq!(
                resolve(dtype),
                Err(ConversionError::UnsupportedElementType(dtype))
            );
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        assert_eq!(resolve(DType::Float64), resolve(DType::Float64));
        assert_eq!(resolve(DType::Bool), resolve(DType::Bool));
    }

    #[test]
    fn test_all_one() {
        assert!(ElementData::from(vec![1.0f64, 1.0]).all_one());
        assert!(!ElementData::from(vec![1.0f64, 2.0]).all_one());
        assert!(ElementData::from(vec![true, true]).all_one());
        assert!(!ElementData::from(vec![true, false]).all_one());
        assert!(ElementData::from(Vec::<f32>::new()).all_one());
    }

    #[test]
    fn test_complex_has_no_native_view() {
        let data = ElementData::from(vec![[1.0, 0.0]]);
        assert_eq!(data.dtype(), DType::Complex128);
        assert!(data.as_native().is_none());
    }
}
