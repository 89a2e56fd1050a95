//! One-time conversion context and the array marshaller it publishes
//!
//! The first conversion imports the foreign `Matrix` class definitions and
//! binds the logical, integer and double constructors. The bound
//! [`Marshaller`] is published through a [`OnceCell`], so concurrent first
//! calls block until a single initialization completes and never observe a
//! partially bound marshaller. A failed initialization is not cached; the
//! next call retries it.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::error::Result;
use crate::runtime::{ForeignRuntime, NativeArray, SexpVector, VectorKind};

/// Package whose classes the converters instantiate
pub const MATRIX_PACKAGE: &str = "Matrix";

/// Package providing the generic `new` constructor
pub const METHODS_PACKAGE: &str = "methods";

/// Converts native buffers into foreign typed vectors
///
/// Each constructor first turns the native buffer into the runtime's generic
/// value, then coerces that value to the requested element kind.
pub struct Marshaller<R: ForeignRuntime> {
    runtime: Arc<R>,
}

impl<R: ForeignRuntime> Marshaller<R> {
    fn bind(runtime: Arc<R>) -> Self {
        Self { runtime }
    }

    /// Converts `values` to a foreign vector of the given kind
    pub fn construct<'a>(
        &self,
        kind: VectorKind,
        values: impl Into<NativeArray<'a>>,
    ) -> Result<SexpVector> {
        let generic = self.runtime.to_generic(values.into());
        self.runtime.coerce(generic, kind)
    }

    pub fn as_integer<'a>(&self, values: impl Into<NativeArray<'a>>) -> Result<SexpVector> {
        self.construct(VectorKind::Integer, values)
    }

    pub fn as_double<'a>(&self, values: impl Into<NativeArray<'a>>) -> Result<SexpVector> {
        self.construct(VectorKind::Double, values)
    }

    pub fn as_logical<'a>(&self, values: impl Into<NativeArray<'a>>) -> Result<SexpVector> {
        self.construct(VectorKind::Logical, values)
    }

    /// Integer `Dim` vector for a `(rows, cols)` shape
    pub fn dim(&self, shape: (usize, usize)) -> Result<SexpVector> {
        self.as_integer(&[shape.0, shape.1][..])
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}

/// Process-wide conversion state, initialized on first use
pub struct ConversionContext<R: ForeignRuntime> {
    runtime: Arc<R>,
    bound: OnceCell<Marshaller<R>>,
}

impl<R: ForeignRuntime> ConversionContext<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            runtime,
            bound: OnceCell::new(),
        }
    }

    /// Returns the bound marshaller, importing the class definitions first
    /// if this is the first call
    pub fn ensure(&self) -> Result<&Marshaller<R>> {
        self.bound.get_or_try_init(|| {
            self.runtime.import_package(MATRIX_PACKAGE)?;
            self.runtime.import_package(METHODS_PACKAGE)?;
            info!("conversion context initialized");
            Ok(Marshaller::bind(Arc::clone(&self.runtime)))
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.bound.get().is_some()
    }

    pub fn runtime(&self) -> &Arc<R> {
        &self.runtime
    }
}
