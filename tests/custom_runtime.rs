//! Converters driven by a recording runtime instead of the Matrix package

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sparse2ri::runtime::Slots;
use sparse2ri::{
    ConversionError, CooMatrix, CsrMatrix, ForeignRuntime, MatrixConverter, Result, SexpVector,
};

/// Records every import and construction without validating anything
#[derive(Default)]
struct RecordingRuntime {
    imports: Mutex<Vec<String>>,
    constructed: AtomicUsize,
    fail_import: bool,
}

impl ForeignRuntime for RecordingRuntime {
    type Object = (String, Slots);

    fn import_package(&self, name: &str) -> Result<()> {
        if self.fail_import {
            return Err(ConversionError::PackageNotFound(name.to_string()));
        }
        self.imports.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn new_instance(&self, class: &str, slots: Slots) -> Result<Self::Object> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        Ok((class.to_string(), slots))
    }
}

#[test]
fn test_imports_matrix_then_methods_once() {
    let runtime = Arc::new(RecordingRuntime::default());
    let conv = MatrixConverter::new(Arc::clone(&runtime));

    for _ in 0..4 {
        let coo = CooMatrix::new(1, 1, vec![0], vec![0], vec![1.0]).unwrap();
        conv.convert_owned(coo).unwrap();
    }

    assert_eq!(*runtime.imports.lock().unwrap(), vec!["Matrix", "methods"]);
    assert_eq!(runtime.constructed.load(Ordering::SeqCst), 4);
}

#[test]
fn test_slot_names_per_class() {
    let conv = MatrixConverter::new(Arc::new(RecordingRuntime::default()));
    let csr = CsrMatrix::new(1, 2, vec![0, 1], vec![1], vec![true]).unwrap();

    let (class, slots) = conv.convert_owned(csr).unwrap();
    assert_eq!(class, "lgRMatrix");
    let names: Vec<&str> = slots.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Dim", "j", "p", "x"]);
    assert_eq!(slots["x"], SexpVector::Logical(vec![Some(true)]));
}

#[test]
fn test_failed_initialization_is_not_cached() {
    let runtime = Arc::new(RecordingRuntime {
        fail_import: true,
        ..RecordingRuntime::default()
    });
    let conv = MatrixConverter::new(Arc::clone(&runtime));
    let coo = CooMatrix::new(1, 1, vec![0], vec![0], vec![1.0]).unwrap();

    let err = conv.convert_owned(coo.clone()).unwrap_err();
    assert_eq!(err, ConversionError::PackageNotFound("Matrix".into()));
    assert!(!conv.context().is_initialized());
    assert_eq!(runtime.constructed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_index_overflow_is_reported() {
    let conv = MatrixConverter::new(Arc::new(RecordingRuntime::default()));
    let wide = i32::MAX as usize + 1;
    let coo = CooMatrix::new(wide + 1, 1, vec![wide], vec![0], vec![1.0]).unwrap();

    assert!(matches!(
        conv.convert_owned(coo),
        Err(ConversionError::ValueOutOfRange { .. })
    ));
}
