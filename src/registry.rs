//! Dispatch from a tagged source matrix to its format converter
//!
//! The source formats form a closed enum, so the association between a
//! format and its converter ([`MatrixConverter::converter_for`]) is an
//! exhaustive `match` rather than a mutable table. Dynamic callers that only
//! know a format by name go through [`MatrixConverter::convert_raw`], where
//! unknown names are rejected with `UnsupportedSourceType`.

use std::sync::Arc;

use tracing::debug;

use crate::context::{ConversionContext, Marshaller};
use crate::convert::{coo_to_foreign, csc_to_foreign, csr_to_foreign, dia_to_foreign, target_class};
use crate::error::{ConversionError, Result};
use crate::matrix::{resolve, ConversionConfig, DType, RawSparse, SourceFormat, SourceMatrix};
use crate::runtime::ForeignRuntime;

/// A format converter taking any source matrix
///
/// Fails with `MalformedMatrix` when handed a source of another format.
pub type Converter<R> = fn(
    &Marshaller<R>,
    &ConversionConfig,
    &mut SourceMatrix,
) -> Result<<R as ForeignRuntime>::Object>;

fn wrong_format(expected: SourceFormat, matrix: &SourceMatrix) -> ConversionError {
    ConversionError::malformed(
        expected,
        format!("{} source handed to the {expected} converter", matrix.format()),
    )
}

fn convert_csc<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    matrix: &mut SourceMatrix,
) -> Result<R::Object> {
    match matrix {
        SourceMatrix::Csc(csc) => csc_to_foreign(m, config, csc),
        other => Err(wrong_format(SourceFormat::Csc, other)),
    }
}

fn convert_csr<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    matrix: &mut SourceMatrix,
) -> Result<R::Object> {
    match matrix {
        SourceMatrix::Csr(csr) => csr_to_foreign(m, config, csr),
        other => Err(wrong_format(SourceFormat::Csr, other)),
    }
}

fn convert_coo<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    matrix: &mut SourceMatrix,
) -> Result<R::Object> {
    match matrix {
        SourceMatrix::Coo(coo) => coo_to_foreign(m, config, coo),
        other => Err(wrong_format(SourceFormat::Coo, other)),
    }
}

fn convert_dia<R: ForeignRuntime>(
    m: &Marshaller<R>,
    config: &ConversionConfig,
    matrix: &mut SourceMatrix,
) -> Result<R::Object> {
    match matrix {
        SourceMatrix::Dia(dia) => dia_to_foreign(m, config, dia),
        other => Err(wrong_format(SourceFormat::Dia, other)),
    }
}

/// Converts source matrices into instances of the foreign sparse classes
pub struct MatrixConverter<R: ForeignRuntime> {
    context: ConversionContext<R>,
    config: ConversionConfig,
}

impl<R: ForeignRuntime> MatrixConverter<R> {
    /// Creates a converter over the given runtime with the default config
    pub fn new(runtime: Arc<R>) -> Self {
        Self::with_config(runtime, ConversionConfig::default())
    }

    pub fn with_config(runtime: Arc<R>, config: ConversionConfig) -> Self {
        Self {
            context: ConversionContext::new(runtime),
            config,
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn context(&self) -> &ConversionContext<R> {
        &self.context
    }

    /// The converter registered for a source format
    pub fn converter_for(format: SourceFormat) -> Converter<R> {
        match format {
            SourceFormat::Csc => convert_csc::<R>,
            SourceFormat::Csr => convert_csr::<R>,
            SourceFormat::Coo => convert_coo::<R>,
            SourceFormat::Dia => convert_dia::<R>,
        }
    }

    /// Converts `matrix` with the converter for its format
    ///
    /// CSC and CSR sources have their indices sorted in place.
    ///
    /// # Errors
    ///
    /// - `PackageNotFound` if the context cannot be initialized; the next
    ///   call retries
    /// - any error of the format's converter
    pub fn convert(&self, matrix: &mut SourceMatrix) -> Result<R::Object> {
        let marshaller = self.context.ensure()?;
        debug!(format = %matrix.format(), dtype = %matrix.dtype(), "dispatching conversion");

        let converter = Self::converter_for(matrix.format());
        converter(marshaller, &self.config, matrix)
    }

    /// Converts an owned matrix of any supported format
    pub fn convert_owned(&self, matrix: impl Into<SourceMatrix>) -> Result<R::Object> {
        let mut matrix = matrix.into();
        self.convert(&mut matrix)
    }

    /// Converts loose components presented under a format name
    pub fn convert_raw(&self, format: &str, raw: RawSparse) -> Result<R::Object> {
        let mut matrix = SourceMatrix::from_raw(format, raw)?;
        self.convert(&mut matrix)
    }

    /// The foreign class a source of this format and dtype converts to
    pub fn target_class(&self, format: SourceFormat, dtype: DType) -> Result<String> {
        Ok(target_class(format, resolve(dtype)?.tag))
    }
}
