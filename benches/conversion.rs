//! Benchmarks for sparse matrix conversion

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sparse2ri::{ConversionConfig, CscMatrix, MatrixConverter, MatrixPackageRuntime};

/// Banded CSC matrix with each column's row indices stored in reverse
fn create_unsorted_csc(n: usize, band: usize) -> CscMatrix {
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::new();
    indptr.push(0);

    for j in 0..n {
        let lo = j.saturating_sub(band);
        let hi = (j + band).min(n - 1);
        indices.extend((lo..=hi).rev());
        indptr.push(indices.len());
    }

    let values = vec![1.5f64; indices.len()];
    CscMatrix::new(n, n, indptr, indices, values).unwrap()
}

fn bench_csc_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("csc_to_dgCMatrix");

    for &n in &[1_000usize, 20_000] {
        let matrix = create_unsorted_csc(n, 4);

        for (label, config) in [
            ("serial", ConversionConfig::serial()),
            ("parallel", ConversionConfig { parallel_sort_threshold: 0, ..ConversionConfig::default() }),
        ] {
            let converter =
                MatrixConverter::with_config(Arc::new(MatrixPackageRuntime::new()), config);
            group.bench_with_input(BenchmarkId::new(label, n), &matrix, |bench, m| {
                bench.iter(|| black_box(converter.convert_owned(m.clone()).unwrap()))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_csc_conversion);
criterion_main!(benches);
