//! Property-based checks over randomly generated sources

use std::sync::Arc;

use proptest::prelude::*;
use sparse2ri::{
    resolve, CooMatrix, CscMatrix, CsrMatrix, DType, MatrixConverter, MatrixPackageRuntime,
    SexpVector,
};

/// Sorted lanes of distinct minor indices with matching values
fn sorted_lanes(
    n_major: usize,
    n_minor: usize,
) -> impl Strategy<Value = (Vec<usize>, Vec<usize>, Vec<f64>)> {
    prop::collection::vec(
        prop::collection::btree_set(0..n_minor, 0..n_minor),
        n_major,
    )
    .prop_flat_map(|lanes| {
        let nnz: usize = lanes.iter().map(|l| l.len()).sum();
        let values = prop::collection::vec(-100.0f64..100.0, nnz);
        (Just(lanes), values)
    })
    .prop_map(|(lanes, values)| {
        let mut indptr = vec![0];
        let mut indices = Vec::new();
        for lane in &lanes {
            indices.extend(lane.iter().copied());
            indptr.push(indices.len());
        }
        (indptr, indices, values)
    })
}

/// Reverses every lane, giving an unsorted permutation with the same contents
fn reverse_lanes(indptr: &[usize], indices: &[usize], values: &[f64]) -> (Vec<usize>, Vec<f64>) {
    let mut ix = indices.to_vec();
    let mut vals = values.to_vec();
    for w in indptr.windows(2) {
        ix[w[0]..w[1]].reverse();
        vals[w[0]..w[1]].reverse();
    }
    (ix, vals)
}

fn converter() -> MatrixConverter<MatrixPackageRuntime> {
    MatrixConverter::new(Arc::new(MatrixPackageRuntime::new()))
}

proptest! {
    #[test]
    fn csc_resorting_is_idempotent((indptr, indices, values) in sorted_lanes(6, 5)) {
        let conv = converter();
        let (shuffled_ix, shuffled_vals) = reverse_lanes(&indptr, &indices, &values);

        let sorted = CscMatrix::new(5, 6, indptr.clone(), indices, values).unwrap();
        let unsorted = CscMatrix::new(5, 6, indptr, shuffled_ix, shuffled_vals).unwrap();

        let a = conv.convert_owned(sorted).unwrap();
        let b = conv.convert_owned(unsorted).unwrap();
        prop_assert_eq!(a.slot("i"), b.slot("i"));
        prop_assert_eq!(a.slot("x"), b.slot("x"));
        prop_assert_eq!(a.slot("p"), b.slot("p"));
    }

    #[test]
    fn csr_resorting_is_idempotent((indptr, indices, values) in sorted_lanes(4, 7)) {
        let conv = converter();
        let (shuffled_ix, shuffled_vals) = reverse_lanes(&indptr, &indices, &values);

        let sorted = CsrMatrix::new(4, 7, indptr.clone(), indices, values).unwrap();
        let unsorted = CsrMatrix::new(4, 7, indptr, shuffled_ix, shuffled_vals).unwrap();

        let a = conv.convert_owned(sorted).unwrap();
        let b = conv.convert_owned(unsorted).unwrap();
        prop_assert_eq!(a.slot("j"), b.slot("j"));
        prop_assert_eq!(a.slot("x"), b.slot("x"));
    }

    #[test]
    fn dim_matches_shape(rows in 1usize..50, cols in 1usize..50, nnz in 0usize..20) {
        let row: Vec<usize> = (0..nnz).map(|k| k % rows).collect();
        let col: Vec<usize> = (0..nnz).map(|k| (k * 7) % cols).collect();
        let coo = CooMatrix::new(rows, cols, row, col, vec![true; nnz]).unwrap();

        let obj = converter().convert_owned(coo).unwrap();
        prop_assert_eq!(obj.dim(), Some((rows, cols)));
        prop_assert_eq!(
            obj.slot("Dim"),
            Some(&SexpVector::Integer(vec![rows as i32, cols as i32]))
        );
    }

    #[test]
    fn tag_is_deterministic(
        dtype in prop::sample::select(vec![DType::Float64, DType::Float32, DType::Bool])
    ) {
        let first = resolve(dtype).unwrap();
        let second = resolve(dtype).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(["d", "l"].contains(&first.tag.as_str()));
    }
}
