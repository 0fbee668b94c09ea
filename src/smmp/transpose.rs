//! Two-pass transposition kernel
//!
//! The first pass counts entries per output row (one per stored entry in
//! the corresponding input column) and lays the counts out as row pointers
//! with a prefix sum. The second pass walks the input rows in order and
//! drops each entry into the next free slot of its destination row, so the
//! output rows come out sorted by construction.


use crate::dtype::{Element, IndexType};

/// Transposes a New Yale matrix of `shape` into the destination buffers
///
/// `t_ija` and `t_vals` must cover the transposed layout: `cols + 1` row
/// pointers plus one slot per off-diagonal entry. The diagonal carries over
/// directly, and the destination's canonical zero is written.
pub fn transpose_yale<T, I>(
    shape: [usize; 2],
    ija: &[I],
    vals: &[T],
    t_ija: &mut [I],
    t_vals: &mut [T],
) where
    T: Element,
    I: IndexType,
{
    let rows = shape[0];
    let cols = shape[1];
    let size = ija[rows].as_usize();

    // pass 1: count entries per input column
    let mut counts = vec![0usize; cols];
    for q in (rows + 1)..size {
        counts[ija[q].as_usize()] += 1;
    }

    let mut next = cols + 1;
    for (j, &count) in counts.iter().enumerate() {
        t_ija[j] = IndexType::from_usize(next);
        next += count;
    }
    t_ija[cols] = IndexType::from_usize(next);

    for d in 0..rows.min(cols) {
        t_vals[d] = vals[d];
    }
    t_vals[cols] = T::zero();

    // pass 2: place each entry at the next free slot of its output row
    let mut cursor: Vec<usize> = (0..cols).map(|j| t_ija[j].as_usize()).collect();
    for i in 0..rows {
        for q in ija[i].as_usize()..ija[i + 1].as_usize() {
            let j = ija[q].as_usize();
            t_ija[cursor[j]] = IndexType::from_usize(i);
            t_vals[cursor[j]] = vals[q];
            cursor[j] += 1;
        }
    }
}
