//! Structural union of two matrices
//!
//! Merging produces a matrix whose off-diagonal pattern is the union of
//! both operands' patterns. It is the structural building block for
//! element-wise binary operations: the result inherits the left operand's
//! element type, diagonal, and off-diagonal structure, then grows by the
//! right operand's exclusive columns as structure-only insertions. Values
//! for the merged slots are left for the caller to fill.

use crate::dtype::{Element, IndexType};
use crate::error::Result;
use crate::storage::search::insert_search;
use crate::storage::yale::YaleStorage;

/// Merges the structural patterns of `left` and `right` into a new matrix
///
/// # Errors
///
/// Returns [`Error::CapacityExceeded`](crate::error::Error::CapacityExceeded)
/// or [`Error::AllocationFailed`](crate::error::Error::AllocationFailed)
/// if growing the union structure fails; partial structure is not returned.
///
/// # Panics
///
/// Panics if the operands' shapes differ.
pub fn create_merged<T, I>(
    left: &YaleStorage<T, I>,
    right: &YaleStorage<T, I>,
) -> Result<YaleStorage<T, I>>
where
    T: Element,
    I: IndexType,
{
    assert_eq!(
        left.shape(),
        right.shape(),
        "matrix shapes must match for a structural merge"
    );

    let rows = left.rows();
    let mut s = left.copy_alloc_struct::<T>(left.capacity().max(right.capacity()));

    // the diagonal and the canonical zero come from the left operand
    s.a[..=rows].copy_from_slice(&left.a[..=rows]);

    // unary callers merge a matrix with itself; the union is then a no-op
    if std::ptr::eq(left, right) {
        return Ok(s);
    }

    for i in 0..rows {
        let (mut ija, mut ija_next) = s.row_range(i);

        let (r_start, r_end) = right.row_range(i);
        for r_p in r_start..r_end {
            let col = right.ija[r_p];

            if ija == ija_next {
                // destination row is empty (or exhausted): append here
                s.vector_insert(ija, &[col.as_usize()], None)?;
                s.increment_ia_after(i, 1);
                s.ndnz += 1;
                ija += 1;
                ija_next += 1;
            } else {
                let (pos, found) = insert_search(&s.ija, ija, ija_next - 1, col);

                if !found {
                    s.vector_insert(pos, &[col.as_usize()], None)?;
                    s.increment_ia_after(i, 1);
                    s.ndnz += 1;
                    // the row grew by one, so its end moves with it
                    ija_next += 1;
                }

                // columns of the right operand arrive sorted, so the next
                // search can start past this position
                ija = pos + 1;
            }
        }
    }

    Ok(s)
}
