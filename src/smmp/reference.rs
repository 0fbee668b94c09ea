//! Reference implementation of matrix multiplication
//!
//! A simple row-by-row product with a hashmap accumulator. Not fast, but
//! obviously correct; used as a baseline to validate the three-phase
//! multiplication.

use std::collections::HashMap;
use std::ops::AddAssign;


use crate::dtype::{Element, IndexType};
use crate::error::Result;
use crate::storage::YaleStorage;

/// Multiplies two matrices the slow, obvious way
///
/// # Panics
///
/// Panics if the operands' inner dimensions differ.
pub fn reference_multiply<T, I>(
    a: &YaleStorage<T, I>,
    b: &YaleStorage<T, I>,
) -> Result<YaleStorage<T, I>>
where
    T: Element + AddAssign,
    I: IndexType,
{
    assert_eq!(
        a.cols(),
        b.rows(),
        "matrix dimensions must be compatible for multiplication"
    );

    let n = a.rows();
    let p = a.cols();
    let m = b.cols();
    let mut out = YaleStorage::<T, I>::zeros(n, m);

    for i in 0..n {
        let mut accum: HashMap<usize, T> = HashMap::new();

        // row i of A, diagonal included
        let mut a_row: Vec<(usize, T)> = a.row_iter(i).map(|(c, &v)| (c, v)).collect();
        if i < p {
            a_row.push((i, a.diagonal()[i]));
        }

        for (k, a_val) in a_row {
            // row k of B, diagonal included
            for (j, &b_val) in b.row_iter(k) {
                *accum.entry(j).or_insert_with(T::zero) += a_val * b_val;
            }
            if k < m {
                *accum.entry(k).or_insert_with(T::zero) += a_val * b.diagonal()[k];
            }
        }

        for (j, val) in accum {
            if !val.is_zero() {
                out.set(i, j, val)?;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_multiplication() {
        // A = [1 2; 0 3], B = [4 5; 6 7], C = A*B = [16 19; 18 21]
        let mut a = YaleStorage::<f64, u32>::zeros(2, 2);
        a.set(0, 0, 1.0).unwrap();
        a.set(0, 1, 2.0).unwrap();
        a.set(1, 1, 3.0).unwrap();

        let mut b = YaleStorage::<f64, u32>::zeros(2, 2);
        b.set(0, 0, 4.0).unwrap();
        b.set(0, 1, 5.0).unwrap();
        b.set(1, 0, 6.0).unwrap();
        b.set(1, 1, 7.0).unwrap();

        let c = reference_multiply(&a, &b).unwrap();

        assert_eq!(c.get(0, 0), 16.0);
        assert_eq!(c.get(0, 1), 19.0);
        assert_eq!(c.get(1, 0), 18.0);
        assert_eq!(c.get(1, 1), 21.0);
    }

    #[test]
    fn test_identity_multiplication() {
        let identity = YaleStorage::<i32, u32>::identity(3);

        let mut diagonal = YaleStorage::<i32, u32>::zeros(3, 3);
        for i in 0..3 {
            diagonal.set(i, i, i as i32 + 5).unwrap();
        }

        let result = reference_multiply(&identity, &diagonal).unwrap();

        for i in 0..3 {
            assert_eq!(result.get(i, i), i as i32 + 5);
        }
        assert_eq!(result.ndnz(), 0);
    }
}
