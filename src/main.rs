use std::sync::Arc;

use ndarray::array;
use sparse2ri::{
    ConversionError, CooMatrix, CsrMatrix, DiaMatrix, MatrixConverter, MatrixPackageRuntime,
    RObject, RawSparse,
};
use tracing::{error, info};

fn report(label: &str, result: Result<RObject, ConversionError>) {
    match result {
        Ok(obj) => {
            info!(source = label, class = obj.class(), dim = ?obj.dim(), "converted");
            for (name, value) in obj.slots() {
                println!("  {label} @{name}: {value:?}");
            }
        }
        Err(err) => error!(source = label, %err, "conversion failed"),
    }
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(version = sparse2ri::VERSION, "sparse2ri demo");
    let converter = MatrixConverter::new(Arc::new(MatrixPackageRuntime::new()));

    // [1 2 0]
    // [0 3 0]
    // [4 0 5], with the first row stored out of order
    let csr = CsrMatrix::new(
        3,
        3,
        vec![0, 2, 3, 5],
        vec![1, 0, 1, 0, 2],
        vec![2.0, 1.0, 3.0, 4.0, 5.0],
    );
    report("csr", csr.and_then(|m| converter.convert_owned(m)));

    let coo = CooMatrix::new(2, 2, vec![0, 1], vec![1, 0], vec![true, true]);
    report("coo", coo.and_then(|m| converter.convert_owned(m)));

    let identity = DiaMatrix::from_array((3, 3), vec![0], array![[1.0, 1.0, 1.0]]);
    report("dia identity", identity.and_then(|m| converter.convert_owned(m)));

    let banded = DiaMatrix::from_array((3, 3), vec![-1, 0], array![[1.0, 2.0, 0.0], [4.0, 5.0, 6.0]]);
    report("dia banded", banded.and_then(|m| converter.convert_owned(m)));

    let bsr = RawSparse::new((2, 2), vec![1.0]).with_compressed(vec![0, 1, 1], vec![0]);
    report("bsr", converter.convert_raw("bsr", bsr));
}
