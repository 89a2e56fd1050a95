//! The closed set of source matrix formats

use std::fmt;
use std::str::FromStr;

use crate::error::{ConversionError, Result};
use crate::matrix::{CooMatrix, CscMatrix, CsrMatrix, DType, DiaMatrix, ElementData};

/// Storage format of a source matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceFormat {
    Csc,
    Csr,
    Coo,
    Dia,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Csc,
        SourceFormat::Csr,
        SourceFormat::Coo,
        SourceFormat::Dia,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Csc => "csc",
            SourceFormat::Csr => "csr",
            SourceFormat::Coo => "coo",
            SourceFormat::Dia => "dia",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = ConversionError;

    /// Accepts `csc`, `csc_matrix` and `csc_array` spellings, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let base = lower
            .strip_suffix("_matrix")
            .or_else(|| lower.strip_suffix("_array"))
            .unwrap_or(lower.as_str());
        match base {
            "csc" => Ok(SourceFormat::Csc),
            "csr" => Ok(SourceFormat::Csr),
            "coo" => Ok(SourceFormat::Coo),
            "dia" => Ok(SourceFormat::Dia),
            _ => Err(ConversionError::UnsupportedSourceType(s.to_string())),
        }
    }
}

/// A sparse matrix tagged by its storage format
#[derive(Debug, Clone, PartialEq)]
pub enum SourceMatrix {
    Csc(CscMatrix),
    Csr(CsrMatrix),
    Coo(CooMatrix),
    Dia(DiaMatrix),
}

impl SourceMatrix {
    pub fn format(&self) -> SourceFormat {
        match self {
            SourceMatrix::Csc(_) => SourceFormat::Csc,
            SourceMatrix::Csr(_) => SourceFormat::Csr,
            SourceMatrix::Coo(_) => SourceFormat::Coo,
            SourceMatrix::Dia(_) => SourceFormat::Dia,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        match self {
            SourceMatrix::Csc(m) => m.shape(),
            SourceMatrix::Csr(m) => m.shape(),
            SourceMatrix::Coo(m) => m.shape(),
            SourceMatrix::Dia(m) => m.shape(),
        }
    }

    pub fn dtype(&self) -> DType {
        self.data().dtype()
    }

    pub fn data(&self) -> &ElementData {
        match self {
            SourceMatrix::Csc(m) => m.data(),
            SourceMatrix::Csr(m) => m.data(),
            SourceMatrix::Coo(m) => m.data(),
            SourceMatrix::Dia(m) => m.data(),
        }
    }

    /// Builds a source matrix from loose components under a format name
    ///
    /// Format names without a converter fail with `UnsupportedSourceType`;
    /// components the format needs but `raw` lacks fail with `MalformedMatrix`.
    pub fn from_raw(format: &str, raw: RawSparse) -> Result<Self> {
        let format = format.parse::<SourceFormat>()?;
        let (n_rows, n_cols) = raw.shape;
        let missing = |field: &str| ConversionError::malformed(format, format!("missing `{field}`"));

        let matrix = match format {
            SourceFormat::Csc => SourceMatrix::Csc(CscMatrix::new(
                n_rows,
                n_cols,
                raw.indptr.ok_or_else(|| missing("indptr"))?,
                raw.indices.ok_or_else(|| missing("indices"))?,
                raw.data,
            )?),
            SourceFormat::Csr => SourceMatrix::Csr(CsrMatrix::new(
                n_rows,
                n_cols,
                raw.indptr.ok_or_else(|| missing("indptr"))?,
                raw.indices.ok_or_else(|| missing("indices"))?,
                raw.data,
            )?),
            SourceFormat::Coo => SourceMatrix::Coo(CooMatrix::new(
                n_rows,
                n_cols,
                raw.row.ok_or_else(|| missing("row"))?,
                raw.col.ok_or_else(|| missing("col"))?,
                raw.data,
            )?),
            SourceFormat::Dia => {
                let offsets = raw.offsets.ok_or_else(|| missing("offsets"))?;
                let diag_len = match offsets.len() {
                    0 => 0,
                    n => raw.data.len() / n,
                };
                SourceMatrix::Dia(DiaMatrix::new(n_rows, n_cols, offsets, raw.data, diag_len)?)
            }
        };
        Ok(matrix)
    }
}

impl From<CscMatrix> for SourceMatrix {
    fn from(m: CscMatrix) -> Self {
        SourceMatrix::Csc(m)
    }
}

impl From<CsrMatrix> for SourceMatrix {
    fn from(m: CsrMatrix) -> Self {
        SourceMatrix::Csr(m)
    }
}

impl From<CooMatrix> for SourceMatrix {
    fn from(m: CooMatrix) -> Self {
        SourceMatrix::Coo(m)
    }
}

impl From<DiaMatrix> for SourceMatrix {
    fn from(m: DiaMatrix) -> Self {
        SourceMatrix::Dia(m)
    }
}

/// Loose named components of a sparse matrix, as handed over by dynamic callers
#[derive(Debug, Clone, PartialEq)]
pub struct RawSparse {
    pub shape: (usize, usize),
    pub data: ElementData,
    pub indptr: Option<Vec<usize>>,
    pub indices: Option<Vec<usize>>,
    pub row: Option<Vec<usize>>,
    pub col: Option<Vec<usize>>,
    pub offsets: Option<Vec<isize>>,
}

impl RawSparse {
    pub fn new(shape: (usize, usize), data: impl Into<ElementData>) -> Self {
        Self {
            shape,
            data: data.into(),
            indptr: None,
            indices: None,
            row: None,
            col: None,
            offsets: None,
        }
    }

    pub fn with_compressed(mut self, indptr: Vec<usize>, indices: Vec<usize>) -> Self {
        self.indptr = Some(indptr);
        self.indices = Some(indices);
        self
    }

    pub fn with_coords(mut self, row: Vec<usize>, col: Vec<usize>) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    pub fn with_offsets(mut self, offsets: Vec<isize>) -> Self {
        self.offsets = Some(offsets);
        self
    }
}
