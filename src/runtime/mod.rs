//! Boundary to the foreign numerical-matrix runtime
//!
//! The conversion core only needs two primitives from the foreign side:
//! importing a package so its classes become resolvable by name, and
//! constructing a new instance of a named class from named slots. Both are
//! captured by [`ForeignRuntime`]. The marshalling hooks default to the
//! coercion rules in [`coerce`] and may be overridden by runtimes that do
//! their own value conversion.

pub mod coerce;
pub mod package;
pub mod vector;

pub use package::{MatrixPackageRuntime, RObject};
pub use vector::{NativeArray, SexpVector, Slots, VectorKind};

use crate::error::Result;

/// Primitives the conversion core consumes from the foreign runtime
pub trait ForeignRuntime: Send + Sync {
    /// The object handle produced by `new_instance`
    type Object;

    /// Makes the named package's classes resolvable by string
    fn import_package(&self, name: &str) -> Result<()>;

    /// Creates a new instance of `class` with the given slots
    fn new_instance(&self, class: &str, slots: Slots) -> Result<Self::Object>;

    /// Converts a native buffer into the runtime's generic value
    fn to_generic(&self, native: NativeArray<'_>) -> SexpVector {
        coerce::to_generic(native)
    }

    /// Coerces a generic value to the requested element kind
    fn coerce(&self, value: SexpVector, kind: VectorKind) -> Result<SexpVector> {
        coerce::coerce(value, kind)
    }
}
