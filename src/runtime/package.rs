//! In-process implementation of the Matrix package class hierarchy
//!
//! [`MatrixPackageRuntime`] knows the slot layout of the eight sparse classes
//! the converters target (`dgCMatrix`, `lgCMatrix`, `dgRMatrix`, `lgRMatrix`,
//! `dgTMatrix`, `lgTMatrix`, `ddiMatrix`, `ldiMatrix`) and applies the same
//! validity rules the foreign class definitions enforce, so a successfully
//! constructed [`RObject`] is one a downstream Matrix consumer would accept.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::{debug, trace};

use crate::error::{ConversionError, Result};
use crate::runtime::{ForeignRuntime, SexpVector, Slots, VectorKind};

/// Packages this runtime can import
const AVAILABLE_PACKAGES: &[&str] = &["base", "methods", "Matrix"];

/// An instance of a foreign class: class name plus named slots
#[derive(Debug, Clone, PartialEq)]
pub struct RObject {
    class: String,
    slots: Slots,
}

impl RObject {
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn slot(&self, name: &str) -> Option<&SexpVector> {
        self.slots.get(name)
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// The `Dim` slot as `(rows, cols)`
    pub fn dim(&self) -> Option<(usize, usize)> {
        let dim = self.slot("Dim")?.as_integer()?;
        match dim {
            [rows, cols] => Some((usize::try_from(*rows).ok()?, usize::try_from(*cols).ok()?)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Layout {
    /// Compressed storage: `index_slot` holds minor indices, `major` is the
    /// `Dim` axis `p` runs over
    Compressed {
        index_slot: &'static str,
        major: usize,
    },
    Triplet,
    Diagonal,
}

#[derive(Debug, Clone, Copy)]
struct ClassDef {
    x_kind: VectorKind,
    layout: Layout,
}

impl ClassDef {
    fn lookup(class: &str) -> Option<Self> {
        let x_kind = match class.as_bytes().first()? {
            b'd' => VectorKind::Double,
            b'l' => VectorKind::Logical,
            _ => return None,
        };
        let layout = match &class[1..] {
            "gCMatrix" => Layout::Compressed {
                index_slot: "i",
                major: 1,
            },
            "gRMatrix" => Layout::Compressed {
                index_slot: "j",
                major: 0,
            },
            "gTMatrix" => Layout::Triplet,
            "diMatrix" => Layout::Diagonal,
            _ => return None,
        };
        Some(Self { x_kind, layout })
    }

    fn slot_kind(&self, slot: &str) -> Option<VectorKind> {
        let allowed: &[&str] = match self.layout {
            Layout::Compressed { index_slot: "i", .. } => &["i", "p", "x", "Dim"],
            Layout::Compressed { .. } => &["j", "p", "x", "Dim"],
            Layout::Triplet => &["i", "j", "x", "Dim"],
            Layout::Diagonal => &["x", "diag", "Dim"],
        };
        if !allowed.contains(&slot) {
            return None;
        }
        Some(match slot {
            "x" => self.x_kind,
            "diag" => VectorKind::Character,
            _ => VectorKind::Integer,
        })
    }

    /// Slot values used by `new` when the caller omits a slot
    fn default_slot(&self, slot: &str) -> SexpVector {
        match slot {
            "Dim" => SexpVector::Integer(vec![0, 0]),
            "p" => SexpVector::Integer(vec![0]),
            "diag" => SexpVector::string("N"),
            "x" => SexpVector::empty(self.x_kind),
            _ => SexpVector::empty(VectorKind::Integer),
        }
    }

    fn slot_names(&self) -> &'static [&'static str] {
        match self.layout {
            Layout::Compressed { index_slot: "i", .. } => &["i", "p", "x", "Dim"],
            Layout::Compressed { .. } => &["j", "p", "x", "Dim"],
            Layout::Triplet => &["i", "j", "x", "Dim"],
            Layout::Diagonal => &["x", "diag", "Dim"],
        }
    }
}

fn integer_slot<'a>(class: &str, slots: &'a Slots, name: &str) -> Result<&'a [i32]> {
    slots
        .get(name)
        .and_then(SexpVector::as_integer)
        .ok_or_else(|| ConversionError::invalid_slot(class, name, "expected an integer vector"))
}

fn check_indices(class: &str, slot: &str, indices: &[i32], bound: i32) -> Result<()> {
    match indices.iter().find(|&&ix| ix < 0 || ix >= bound) {
        Some(ix) => Err(ConversionError::invalid_slot(
            class,
            slot,
            format!("index {ix} outside [0, {bound})"),
        )),
        None => Ok(()),
    }
}

fn validate(class: &str, def: &ClassDef, slots: &Slots) -> Result<()> {
    let dim = integer_slot(class, slots, "Dim")?;
    let (rows, cols) = match dim {
        [rows, cols] if *rows >= 0 && *cols >= 0 => (*rows, *cols),
        _ => {
            return Err(ConversionError::invalid_slot(
                class,
                "Dim",
                "must be two non-negative integers",
            ))
        }
    };
    let x_len = slots.get("x").map_or(0, SexpVector::len);

    match def.layout {
        Layout::Compressed { index_slot, major } => {
            let p = integer_slot(class, slots, "p")?;
            let idx = integer_slot(class, slots, index_slot)?;
            let (n_major, n_minor) = if major == 1 { (cols, rows) } else { (rows, cols) };

            if p.len() != n_major as usize + 1 {
                return Err(ConversionError::invalid_slot(
                    class,
                    "p",
                    format!("length {} but expected {}", p.len(), n_major + 1),
                ));
            }
            if p[0] != 0 || p.windows(2).any(|w| w[0] > w[1]) {
                return Err(ConversionError::invalid_slot(
                    class,
                    "p",
                    "must start at 0 and be non-decreasing",
                ));
            }
            if p[p.len() - 1] as usize != idx.len() {
                return Err(ConversionError::invalid_slot(
                    class,
                    "p",
                    format!("last element must equal length({index_slot})"),
                ));
            }
            if idx.len() != x_len {
                return Err(ConversionError::invalid_slot(
                    class,
                    "x",
                    format!("length must equal length({index_slot})"),
                ));
            }
            check_indices(class, index_slot, idx, n_minor)?;
            for lane in p.windows(2) {
                let seg = &idx[lane[0] as usize..lane[1] as usize];
                if seg.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(ConversionError::invalid_slot(
                        class,
                        index_slot,
                        "indices are not strictly increasing within a lane",
                    ));
                }
            }
        }
        Layout::Triplet => {
            let i = integer_slot(class, slots, "i")?;
            let j = integer_slot(class, slots, "j")?;
            if i.len() != j.len() || i.len() != x_len {
                return Err(ConversionError::invalid_slot(
                    class,
                    "x",
                    "i, j and x must have equal length",
                ));
            }
            check_indices(class, "i", i, rows)?;
            check_indices(class, "j", j, cols)?;
        }
        Layout::Diagonal => {
            if rows != cols {
                return Err(ConversionError::invalid_slot(
                    class,
                    "Dim",
                    "diagonal matrices must be square",
                ));
            }
            let diag = slots
                .get("diag")
                .and_then(SexpVector::as_character)
                .unwrap_or_default();
            match diag {
                [d] if d == "U" => {
                    if x_len != 0 {
                        return Err(ConversionError::invalid_slot(
                            class,
                            "x",
                            "must be empty for a unit diagonal",
                        ));
                    }
                }
                [d] if d == "N" => {
                    if x_len != rows as usize {
                        return Err(ConversionError::invalid_slot(
                            class,
                            "x",
                            format!("length {x_len} but expected {rows}"),
                        ));
                    }
                }
                _ => {
                    return Err(ConversionError::invalid_slot(
                        class,
                        "diag",
                        "must be \"U\" or \"N\"",
                    ))
                }
            }
        }
    }
    Ok(())
}

/// Foreign runtime providing the Matrix package classes in-process
#[derive(Debug, Default)]
pub struct MatrixPackageRuntime {
    imported: Mutex<HashSet<String>>,
    import_calls: AtomicUsize,
}

impl MatrixPackageRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `import_package` calls observed so far
    pub fn import_calls(&self) -> usize {
        self.import_calls.load(Ordering::SeqCst)
    }

    pub fn is_imported(&self, name: &str) -> bool {
        self.imported
            .lock()
            .map(|set| set.contains(name))
            .unwrap_or(false)
    }
}

impl ForeignRuntime for MatrixPackageRuntime {
    type Object = RObject;

    fn import_package(&self, name: &str) -> Result<()> {
        self.import_calls.fetch_add(1, Ordering::SeqCst);
        if !AVAILABLE_PACKAGES.contains(&name) {
            return Err(ConversionError::PackageNotFound(name.to_string()));
        }
        let mut imported = self
            .imported
            .lock()
            .map_err(|_| ConversionError::PackageNotFound(name.to_string()))?;
        if imported.insert(name.to_string()) {
            debug!(package = name, "imported foreign package");
        }
        Ok(())
    }

    fn new_instance(&self, class: &str, mut slots: Slots) -> Result<RObject> {
        if !self.is_imported("Matrix") {
            return Err(ConversionError::PackageNotFound("Matrix".to_string()));
        }
        let def = ClassDef::lookup(class)
            .ok_or_else(|| ConversionError::UnknownClass(class.to_string()))?;

        for (name, value) in &slots {
            let expected = def.slot_kind(name).ok_or_else(|| {
                ConversionError::invalid_slot(class, name, "no slot of this name in the class")
            })?;
            if value.kind() != expected {
                return Err(ConversionError::invalid_slot(
                    class,
                    name,
                    format!("got a {} vector but expected {}", value.kind(), expected),
                ));
            }
        }
        for &name in def.slot_names() {
            slots
                .entry(name.to_string())
                .or_insert_with(|| def.default_slot(name));
        }

        validate(class, &def, &slots)?;
        trace!(class, "constructed foreign instance");

        Ok(RObject {
            class: class.to_string(),
            slots,
        })
    }
}
