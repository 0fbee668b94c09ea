//! Numeric phase of sparse matrix multiplication
//!
//! Fills the value buffer of a product whose structure was laid out by the
//! symbolic phase. Each row of the left operand is scattered into a dense
//! accumulator indexed by output column, then the accumulated values are
//! gathered back out in structure order, resetting only the slots that were
//! touched.

use std::ops::AddAssign;


use crate::dtype::{Element, IndexType};

/// Computes the values of `C = A * B` into `c_vals`
///
/// `c_ija` is the product structure produced by
/// [`symbmm`](crate::smmp::symbmm). The dense diagonal prefixes of both
/// operands participate as implicit entries at `(i, i)`; the product's own
/// diagonal is written to its dense prefix rather than to a structural
/// slot.
pub fn numbmm<T, I>(
    a_shape: [usize; 2],
    b_shape: [usize; 2],
    a_ija: &[I],
    a_vals: &[T],
    b_ija: &[I],
    b_vals: &[T],
    c_ija: &[I],
    c_vals: &mut [T],
) where
    T: Element + AddAssign,
    I: IndexType,
{
    let n = a_shape[0];
    let p = a_shape[1];
    let m = b_shape[1];
    debug_assert_eq!(p, b_shape[0], "inner dimensions must agree");

    let min_nm = n.min(m);
    let mut accum = vec![T::zero(); m];

    for i in 0..n {
        let a_start = a_ija[i].as_usize();
        let a_end = a_ija[i + 1].as_usize();

        // scatter row i of A through the rows of B it selects; the
        // trailing iteration of each walk covers the diagonal entry
        for jj in a_start..=a_end {
            let (j, a_val) = if jj == a_end {
                if i >= p {
                    continue;
                }
                (i, a_vals[i])
            } else {
                (a_ija[jj].as_usize(), a_vals[jj])
            };

            let b_start = b_ija[j].as_usize();
            let b_end = b_ija[j + 1].as_usize();

            for kk in b_start..=b_end {
                let (k, b_val) = if kk == b_end {
                    if j >= m {
                        continue;
                    }
                    (j, b_vals[j])
                } else {
                    (b_ija[kk].as_usize(), b_vals[kk])
                };

                accum[k] += a_val * b_val;
            }
        }

        // gather in structure order, clearing the accumulator as we go
        if i < min_nm {
            c_vals[i] = accum[i];
            accum[i] = T::zero();
        }
        for q in c_ija[i].as_usize()..c_ija[i + 1].as_usize() {
            let k = c_ija[q].as_usize();
            c_vals[q] = accum[k];
            accum[k] = T::zero();
        }
    }
}
