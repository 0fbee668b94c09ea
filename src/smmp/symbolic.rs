//! Symbolic phase of sparse matrix multiplication
//!
//! Determines which cells of the product are structurally nonzero, without
//! touching any values. The output is the product's row pointers and column
//! indices, written into a caller-provided buffer; columns within a row
//! arrive in discovery order and are sorted afterwards.

use crate::dtype::IndexType;
use crate::error::{Error, Result};

/// Builds the structure of `C = A * B` from the operands' IJA buffers
///
/// `a_shape` and `b_shape` are the operand shapes; `c_ija` must span the
/// result's capacity and receives the row pointers and off-diagonal column
/// indices. A marker array of length `cols(B)` records which output columns
/// are already registered in the current row, so each column is emitted at
/// most once per row.
///
/// Returns the in-use size of the product structure.
///
/// # Errors
///
/// Returns [`Error::CapacityExceeded`] if the structure outgrows `c_ija`.
pub fn symbmm<I: IndexType>(
    a_shape: [usize; 2],
    b_shape: [usize; 2],
    a_ija: &[I],
    b_ija: &[I],
    c_ija: &mut [I],
) -> Result<usize> {
    let n = a_shape[0];
    let p = a_shape[1];
    let m = b_shape[1];
    debug_assert_eq!(p, b_shape[0], "inner dimensions must agree");
    debug_assert!(c_ija.len() > n + 1, "result buffer too small for its row pointers");

    let capacity = c_ija.len();
    let mut mask = vec![usize::MAX; m];
    let mut next = n + 1;

    for i in 0..n {
        c_ija[i] = IndexType::from_usize(next);

        let a_start = a_ija[i].as_usize();
        let a_end = a_ija[i + 1].as_usize();

        // walk row i of A; the trailing iteration covers the diagonal
        for jj in a_start..=a_end {
            let j = if jj == a_end {
                if i >= p {
                    continue;
                }
                i
            } else {
                a_ija[jj].as_usize()
            };

            let b_start = b_ija[j].as_usize();
            let b_end = b_ija[j + 1].as_usize();

            for kk in b_start..=b_end {
                let k = if kk == b_end {
                    if j >= m {
                        continue;
                    }
                    j
                } else {
                    b_ija[kk].as_usize()
                };

                if mask[k] != i {
                    mask[k] = i;

                    // the product's diagonal lives in the dense prefix and
                    // needs no structural slot
                    if k != i {
                        if next >= capacity {
                            return Err(Error::CapacityExceeded {
                                max_capacity: capacity,
                            });
                        }
                        c_ija[next] = IndexType::from_usize(k);
                        next += 1;
                    }
                }
            }
        }
    }

    c_ija[n] = IndexType::from_usize(next);
    Ok(next)
}
