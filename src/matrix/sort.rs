//! In-place index normalization for compressed storage
//!
//! A lane is one column of a CSC matrix or one row of a CSR matrix. Sorting
//! reorders the minor indices of every lane ascending and applies the same
//! permutation to the data, leaving the pointer array untouched. The sort is
//! stable, so duplicate indices keep their relative order.

use rayon::prelude::*;

use crate::matrix::ElementData;

/// Whether the minor indices of every lane are in ascending order
pub fn lanes_sorted(indptr: &[usize], indices: &[usize]) -> bool {
    indptr
        .windows(2)
        .all(|w| indices[w[0]..w[1]].windows(2).all(|p| p[0] <= p[1]))
}

fn sort_lane<T: Copy>(indices: &mut [usize], data: &mut [T]) {
    if indices.windows(2).all(|p| p[0] <= p[1]) {
        return;
    }

    let mut pairs: Vec<(usize, T)> = indices
        .iter()
        .copied()
        .zip(data.iter().copied())
        .collect();
    pairs.sort_by_key(|&(ix, _)| ix);

    for (k, (ix, value)) in pairs.into_iter().enumerate() {
        indices[k] = ix;
        data[k] = value;
    }
}

/// Splits the index and data buffers into per-lane mutable views
fn split_lanes<'a, T>(
    indptr: &[usize],
    mut indices: &'a mut [usize],
    mut data: &'a mut [T],
) -> Vec<(&'a mut [usize], &'a mut [T])> {
    let mut lanes = Vec::with_capacity(indptr.len().saturating_sub(1));

    for w in indptr.windows(2) {
        let len = w[1] - w[0];
        let (lane_ix, rest_ix) = std::mem::take(&mut indices).split_at_mut(len);
        let (lane_data, rest_data) = std::mem::take(&mut data).split_at_mut(len);
        lanes.push((lane_ix, lane_data));
        indices = rest_ix;
        data = rest_data;
    }

    lanes
}

/// Sorts every lane of a compressed matrix in place
///
/// `indptr` must start at 0, be non-decreasing and end at `indices.len()`,
/// which the source matrix constructors guarantee.
pub fn sort_lanes<T: Copy + Send>(
    indptr: &[usize],
    indices: &mut [usize],
    data: &mut [T],
    parallel: bool,
) {
    let lanes = split_lanes(indptr, indices, data);

    if parallel {
        lanes
            .into_par_iter()
            .for_each(|(ix, values)| sort_lane(ix, values));
    } else {
        for (ix, values) in lanes {
            sort_lane(ix, values);
        }
    }
}

/// Sorts lanes of dynamically typed data
pub(crate) fn sort_data_lanes(
    indptr: &[usize],
    indices: &mut [usize],
    data: &mut ElementData,
    parallel: bool,
) {
    match data {
        ElementData::Float64(v) => sort_lanes(indptr, indices, v, parallel),
        ElementData::Float32(v) => sort_lanes(indptr, indices, v, parallel),
        ElementData::Bool(v) => sort_lanes(indptr, indices, v, parallel),
        ElementData::Int32(v) => sort_lanes(indptr, indices, v, parallel),
        ElementData::Int64(v) => sort_lanes(indptr, indices, v, parallel),
        ElementData::Complex128(v) => sort_lanes(indptr, indices, v, parallel),
    }
}
