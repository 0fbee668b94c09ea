//! # nuyale: New Yale sparse matrix storage
//!
//! A compact, mutable, in-memory representation for two-dimensional sparse
//! matrices, built for fast random access and sparse-by-sparse
//! multiplication.
//!
//! ## Overview
//!
//! New Yale is compressed-row storage with one twist: the main diagonal
//! lives in a dense prefix of the value buffer, giving O(1) reads and
//! writes for diagonal cells. Everything else about the layout is shared
//! between two parallel buffers:
//!
//! - row pointers and off-diagonal column indices in `ija`
//! - the diagonal, a canonical zero slot, and off-diagonal values in `a`
//!
//! Both buffers grow geometrically as entries are inserted, and every
//! mutating operation keeps the row ranges sorted, so cell lookups stay
//! logarithmic in row width.
//!
//! ## Usage
//!
//! Random access and insertion:
//!
//! ```
//! use nuyale::YaleStorage;
//!
//! let mut m = YaleStorage::<f64>::zeros(3, 3);
//! m.set(0, 0, 1.0).unwrap();
//! m.set(0, 2, 7.0).unwrap();
//!
//! assert_eq!(m.get(0, 0), 1.0);
//! assert_eq!(m.get(0, 2), 7.0);
//! assert_eq!(m.get(2, 0), 0.0); // missing cells read as zero
//! ```
//!
//! Sparse-by-sparse multiplication:
//!
//! ```
//! use nuyale::{matrix_multiply, YaleStorage};
//!
//! let mut a = YaleStorage::<f64>::zeros(2, 2);
//! a.set(0, 0, 1.0).unwrap();
//! a.set(0, 1, 2.0).unwrap();
//! let b = YaleStorage::<f64>::identity(2);
//!
//! let c = matrix_multiply(&a, &b).unwrap();
//! assert_eq!(c.get(0, 0), 1.0);
//! assert_eq!(c.get(0, 1), 2.0);
//! ```

pub mod constants;
pub mod dtype;
pub mod error;
pub mod smmp;
pub mod storage;
pub mod utils;

pub use dtype::{itype_for_shape, promote, CastInto, DType, Element, IType, IndexType};
pub use error::{Error, Result};
pub use smmp::reference_multiply;
pub use storage::{create_merged, eqeq, CellRef, SetResult, YaleStorage};
pub use utils::{from_csmat, to_csmat};

use std::ops::AddAssign;

use constants::{max_capacity, min_capacity};

/// Multiplies two sparse matrices
///
/// Runs the three-phase scheme: a symbolic pass lays out the product's
/// structure in a result descriptor sized to the operands' combined
/// capacity, a numeric pass fills the values, and a per-row sort restores
/// column order.
///
/// # Errors
///
/// Returns [`Error::CapacityExceeded`] if the product's structure outgrows
/// the combined capacity of the operands.
///
/// # Panics
///
/// Panics if the operands' inner dimensions differ.
///
/// # Examples
///
/// ```
/// use nuyale::{matrix_multiply, YaleStorage};
///
/// let mut a = YaleStorage::<f64>::zeros(2, 3);
/// a.set(0, 1, 2.0).unwrap();
/// let mut b = YaleStorage::<f64>::zeros(3, 2);
/// b.set(1, 0, 5.0).unwrap();
///
/// let c = matrix_multiply(&a, &b).unwrap();
/// assert_eq!(c.shape(), [2, 2]);
/// assert_eq!(c.get(0, 0), 10.0);
/// ```
pub fn matrix_multiply<T, I>(
    left: &YaleStorage<T, I>,
    right: &YaleStorage<T, I>,
) -> Result<YaleStorage<T, I>>
where
    T: Element + AddAssign,
    I: IndexType,
{
    assert_eq!(
        left.cols(),
        right.rows(),
        "matrix dimensions must be compatible for multiplication"
    );

    let shape = [left.rows(), right.cols()];
    let min = min_capacity(shape[0]);
    let max = max_capacity(shape[0], shape[1]);
    let capacity = (left.capacity() + right.capacity()).clamp(min, max.max(min));

    let mut result = YaleStorage::<T, I>::with_capacity(shape, capacity);

    let size = smmp::symbmm(
        left.shape(),
        right.shape(),
        &left.ija,
        &right.ija,
        &mut result.ija,
    )?;

    smmp::numbmm(
        left.shape(),
        right.shape(),
        &left.ija,
        &left.a,
        &right.ija,
        &right.a,
        &result.ija,
        &mut result.a,
    );

    smmp::sort_row_columns(shape[0], &mut result.ija, &mut result.a);

    result.ndnz = size - shape[0] - 1;
    Ok(result)
}

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
