//! Native arrays on the way in, foreign typed vectors on the way out

use std::collections::BTreeMap;
use std::fmt;

/// Element kind of a foreign vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Logical,
    Integer,
    Double,
    Character,
}

impl VectorKind {
    pub fn name(&self) -> &'static str {
        match self {
            VectorKind::Logical => "logical",
            VectorKind::Integer => "integer",
            VectorKind::Double => "double",
            VectorKind::Character => "character",
        }
    }
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed flat native buffer awaiting conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeArray<'a> {
    Index(&'a [usize]),
    Int32(&'a [i32]),
    Int64(&'a [i64]),
    Float64(&'a [f64]),
    Float32(&'a [f32]),
    Bool(&'a [bool]),
}

impl<'a> NativeArray<'a> {
    pub fn len(&self) -> usize {
        match self {
            NativeArray::Index(v) => v.len(),
            NativeArray::Int32(v) => v.len(),
            NativeArray::Int64(v) => v.len(),
            NativeArray::Float64(v) => v.len(),
            NativeArray::Float32(v) => v.len(),
            NativeArray::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [usize]> for NativeArray<'a> {
    fn from(values: &'a [usize]) -> Self {
        NativeArray::Index(values)
    }
}

impl<'a> From<&'a Vec<usize>> for NativeArray<'a> {
    fn from(values: &'a Vec<usize>) -> Self {
        NativeArray::Index(values)
    }
}

impl<'a> From<&'a [f64]> for NativeArray<'a> {
    fn from(values: &'a [f64]) -> Self {
        NativeArray::Float64(values)
    }
}

impl<'a> From<&'a [bool]> for NativeArray<'a> {
    fn from(values: &'a [bool]) -> Self {
        NativeArray::Bool(values)
    }
}

/// A typed vector in the foreign runtime's representation
///
/// Logical vectors are tri-state: `None` is the foreign NA.
#[derive(Debug, Clone, PartialEq)]
pub enum SexpVector {
    Logical(Vec<Option<bool>>),
    Integer(Vec<i32>),
    Double(Vec<f64>),
    Character(Vec<String>),
}

impl SexpVector {
    /// A zero-length vector of the given kind
    pub fn empty(kind: VectorKind) -> Self {
        match kind {
            VectorKind::Logical => SexpVector::Logical(Vec::new()),
            VectorKind::Integer => SexpVector::Integer(Vec::new()),
            VectorKind::Double => SexpVector::Double(Vec::new()),
            VectorKind::Character => SexpVector::Character(Vec::new()),
        }
    }

    /// A length-one character vector
    pub fn string(value: &str) -> Self {
        SexpVector::Character(vec![value.to_string()])
    }

    pub fn kind(&self) -> VectorKind {
        match self {
            SexpVector::Logical(_) => VectorKind::Logical,
            SexpVector::Integer(_) => VectorKind::Integer,
            SexpVector::Double(_) => VectorKind::Double,
            SexpVector::Character(_) => VectorKind::Character,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SexpVector::Logical(v) => v.len(),
            SexpVector::Integer(v) => v.len(),
            SexpVector::Double(v) => v.len(),
            SexpVector::Character(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_integer(&self) -> Option<&[i32]> {
        match self {
            SexpVector::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<&[f64]> {
        match self {
            SexpVector::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<&[Option<bool>]> {
        match self {
            SexpVector::Logical(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_character(&self) -> Option<&[String]> {
        match self {
            SexpVector::Character(v) => Some(v),
            _ => None,
        }
    }
}

/// Named slots handed to `new_instance`, kept in name order
pub type Slots = BTreeMap<String, SexpVector>;
