//! Per-row column sort for multiplication results
//!
//! The symbolic phase emits each row's columns in discovery order, so a
//! freshly multiplied matrix does not yet satisfy row sortedness. This pass
//! reorders every row's `(column, value)` pairs by column, restoring the
//! invariant the accessors rely on.

use crate::dtype::{Element, IndexType};

/// Sorts the `(column, value)` pairs of every row by column index
///
/// `ija` and `vals` are the parallel buffers of one matrix; only positions
/// inside off-diagonal row ranges are touched.
pub fn sort_row_columns<T, I>(rows: usize, ija: &mut [I], vals: &mut [T])
where
    T: Element,
    I: IndexType,
{
    let mut row: Vec<(I, T)> = Vec::new();

    for i in 0..rows {
        let start = ija[i].as_usize();
        let end = ija[i + 1].as_usize();
        if end - start < 2 {
            continue;
        }

        row.clear();
        row.extend((start..end).map(|q| (ija[q], vals[q])));
        row.sort_unstable_by_key(|&(c, _)| c);

        for (offset, &(c, v)) in row.iter().enumerate() {
            ija[start + offset] = c;
            vals[start + offset] = v;
        }
    }
}
