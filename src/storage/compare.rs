//! Whole-matrix equality tolerant of stored zeros
//!
//! Two matrices are equal when they agree as functions `(i, j) -> value`,
//! regardless of which cells happen to be stored explicitly. An explicit
//! off-diagonal zero therefore compares equal to a missing entry.


use crate::dtype::{CastInto, Element, IndexType};
use crate::storage::yale::YaleStorage;

/// Compares two matrices for equality, promoting both sides into `P`
///
/// `P` is the common type the embedder's promotion rule selects for the
/// pair of element types (see [`promote`](crate::dtype::promote)); for
/// same-type comparisons it is simply the element type itself.
///
/// Matrices of different shapes are unequal. Otherwise the diagonals are
/// compared element-wise and each pair of off-diagonal row ranges is
/// compared with a merge walk: wherever only one side stores an entry, that
/// entry must hold the numeric zero.
pub fn eqeq<P, L, R, I>(left: &YaleStorage<L, I>, right: &YaleStorage<R, I>) -> bool
where
    P: Element,
    L: Element + CastInto<P>,
    R: Element + CastInto<P>,
    I: IndexType,
{
    if left.shape() != right.shape() {
        return false;
    }

    let rows = left.rows();
    for i in 0..rows {
        let lv: P = left.a[i].cast_into();
        let rv: P = right.a[i].cast_into();
        if lv != rv {
            return false;
        }
    }

    for i in 0..rows {
        let (l_start, l_end) = left.row_range(i);
        let (r_start, r_end) = right.row_range(i);

        if !ndrow_eqeq::<P, L, R, I>(left, right, l_start, l_end, r_start, r_end) {
            return false;
        }
    }

    true
}

/// Merge walk over one pair of off-diagonal row ranges
fn ndrow_eqeq<P, L, R, I>(
    left: &YaleStorage<L, I>,
    right: &YaleStorage<R, I>,
    mut lp: usize,
    l_end: usize,
    mut rp: usize,
    r_end: usize,
) -> bool
where
    P: Element,
    L: Element + CastInto<P>,
    R: Element + CastInto<P>,
    I: IndexType,
{
    loop {
        match (lp < l_end, rp < r_end) {
            (false, false) => return true,

            // one side exhausted: the other may only hold stored zeros
            (true, false) => {
                let lv: P = left.a[lp].cast_into();
                if !lv.is_zero() {
                    return false;
                }
                lp += 1;
            }
            (false, true) => {
                let rv: P = right.a[rp].cast_into();
                if !rv.is_zero() {
                    return false;
                }
                rp += 1;
            }

            (true, true) => {
                let l_col = left.ija[lp];
                let r_col = right.ija[rp];

                if l_col == r_col {
                    let lv: P = left.a[lp].cast_into();
                    let rv: P = right.a[rp].cast_into();
                    if lv != rv {
                        return false;
                    }
                    lp += 1;
                    rp += 1;
                } else if l_col < r_col {
                    // column stored only on the left
                    let lv: P = left.a[lp].cast_into();
                    if !lv.is_zero() {
                        return false;
                    }
                    lp += 1;
                } else {
                    let rv: P = right.a[rp].cast_into();
                    if !rv.is_zero() {
                        return false;
                    }
                    rp += 1;
                }
            }
        }
    }
}

impl<T, I> PartialEq for YaleStorage<T, I>
where
    T: Element + CastInto<T>,
    I: IndexType,
{
    fn eq(&self, other: &Self) -> bool {
        eqeq::<T, T, T, I>(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_after_same_writes() {
        let mut a = YaleStorage::<f64, u32>::zeros(3, 3);
        let mut b = YaleStorage::<f64, u32>::zeros(3, 3);

        a.set(0, 0, 1.0).unwrap();
        a.set(1, 2, 4.0).unwrap();
        b.set(1, 2, 4.0).unwrap();
        b.set(0, 0, 1.0).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_diagonal_mismatch() {
        let mut a = YaleStorage::<f64, u32>::zeros(2, 2);
        let b = YaleStorage::<f64, u32>::zeros(2, 2);
        a.set(1, 1, 3.0).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_stored_zero_equals_missing() {
        let mut a = YaleStorage::<f64, u32>::zeros(3, 3);
        let b = YaleStorage::<f64, u32>::zeros(3, 3);

        // leaves an explicit stored zero at (0, 1)
        a.set(0, 1, 0.0).unwrap();
        assert_eq!(a.ndnz(), 1);

        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn test_stored_nonzero_not_missing() {
        let mut a = YaleStorage::<f64, u32>::zeros(3, 3);
        let b = YaleStorage::<f64, u32>::zeros(3, 3);

        a.set(0, 1, 2.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_interleaved_columns() {
        let mut a = YaleStorage::<i32, u32>::zeros(2, 6);
        let mut b = YaleStorage::<i32, u32>::zeros(2, 6);

        a.set(0, 1, 5).unwrap();
        a.set(0, 4, 6).unwrap();
        b.set(0, 1, 5).unwrap();
        b.set(0, 2, 0).unwrap(); // stored zero between the shared columns
        b.set(0, 4, 6).unwrap();

        assert_eq!(a, b);

        b.set(0, 2, 9).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cross_dtype() {
        let mut a = YaleStorage::<i32, u32>::zeros(2, 2);
        let mut b = YaleStorage::<f64, u32>::zeros(2, 2);

        a.set(0, 1, 3).unwrap();
        a.set(1, 1, 2).unwrap();
        b.set(0, 1, 3.0).unwrap();
        b.set(1, 1, 2.0).unwrap();

        assert!(eqeq::<f64, i32, f64, u32>(&a, &b));

        b.set(0, 1, 3.5).unwrap();
        assert!(!eqeq::<f64, i32, f64, u32>(&a, &b));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = YaleStorage::<f64, u32>::zeros(2, 3);
        let b = YaleStorage::<f64, u32>::zeros(3, 2);

        assert!(!eqeq::<f64, f64, f64, u32>(&a, &b));
    }
}
