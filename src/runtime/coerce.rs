//! Coercion rules: native buffer → generic foreign value → requested kind

use num_traits::ToPrimitive;

use crate::error::{ConversionError, Result};
use crate::runtime::{NativeArray, SexpVector, VectorKind};

fn out_of_range(value: impl ToString, kind: VectorKind) -> ConversionError {
    ConversionError::ValueOutOfRange {
        value: value.to_string(),
        kind,
    }
}

/// Integer vector when every value fits the foreign integer width, double otherwise
fn integers<T: ToPrimitive + Copy>(values: &[T]) -> SexpVector {
    match values.iter().map(|v| v.to_i32()).collect::<Option<Vec<i32>>>() {
        Some(ints) => SexpVector::Integer(ints),
        None => SexpVector::Double(values.iter().filter_map(|v| v.to_f64()).collect()),
    }
}

/// Converts a native buffer into the foreign runtime's generic value
pub fn to_generic(native: NativeArray<'_>) -> SexpVector {
    match native {
        NativeArray::Index(v) => integers(v),
        NativeArray::Int32(v) => SexpVector::Integer(v.to_vec()),
        NativeArray::Int64(v) => integers(v),
        NativeArray::Float64(v) => SexpVector::Double(v.to_vec()),
        NativeArray::Float32(v) => SexpVector::Double(v.iter().map(|&x| f64::from(x)).collect()),
        NativeArray::Bool(v) => SexpVector::Logical(v.iter().map(|&b| Some(b)).collect()),
    }
}

fn double_to_integer(x: f64) -> Result<i32> {
    if !x.is_finite() {
        return Err(out_of_range(x, VectorKind::Integer));
    }
    x.trunc()
        .to_i32()
        .ok_or_else(|| out_of_range(x, VectorKind::Integer))
}

/// Coerces a generic value to the requested element kind
pub fn coerce(value: SexpVector, kind: VectorKind) -> Result<SexpVector> {
    if value.kind() == kind {
        return Ok(value);
    }

    let coerced = match (value, kind) {
        (SexpVector::Integer(v), VectorKind::Double) => {
            SexpVector::Double(v.into_iter().map(f64::from).collect())
        }
        (SexpVector::Integer(v), VectorKind::Logical) => {
            SexpVector::Logical(v.into_iter().map(|x| Some(x != 0)).collect())
        }

        (SexpVector::Double(v), VectorKind::Integer) => SexpVector::Integer(
            v.into_iter()
                .map(double_to_integer)
                .collect::<Result<Vec<_>>>()?,
        ),
        (SexpVector::Double(v), VectorKind::Logical) => SexpVector::Logical(
            v.into_iter()
                .map(|x| if x.is_nan() { None } else { Some(x != 0.0) })
                .collect(),
        ),

        (SexpVector::Logical(v), VectorKind::Double) => SexpVector::Double(
            v.into_iter()
                .map(|b| b.map_or(f64::NAN, |b| if b { 1.0 } else { 0.0 }))
                .collect(),
        ),
        (SexpVector::Logical(v), VectorKind::Integer) => SexpVector::Integer(
            v.into_iter()
                .map(|b| b.map(i32::from).ok_or_else(|| out_of_range("NA", VectorKind::Integer)))
                .collect::<Result<Vec<_>>>()?,
        ),

        // Marshalling never produces or requests character vectors
        (value, kind) => return Err(out_of_range(format!("{} vector", value.kind()), kind)),
    };

    Ok(coerced)
}
