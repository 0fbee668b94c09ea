//! Utilities for converting between Yale storage and external formats

use sprs::CsMat;

use crate::dtype::{CastInto, Element, IndexType};
use crate::error::Result;
use crate::storage::YaleStorage;

/// Converts a Yale matrix to a sprs CSR matrix
///
/// The diagonal is merged into each row at its sorted position; zero-valued
/// cells (including stored zeros) are dropped, so the output holds only
/// genuine nonzeros.
pub fn to_csmat<T, I>(matrix: &YaleStorage<T, I>) -> CsMat<T>
where
    T: Element,
    I: IndexType,
{
    let rows = matrix.rows();
    let cols = matrix.cols();

    let mut indptr = Vec::with_capacity(rows + 1);
    let mut indices = Vec::new();
    let mut data = Vec::new();

    indptr.push(0);
    for i in 0..rows {
        let diag = if i < cols { matrix.diagonal()[i] } else { T::zero() };
        let mut diag_placed = i >= cols;

        for (j, &v) in matrix.row_iter(i) {
            if !diag_placed && j > i {
                if !diag.is_zero() {
                    indices.push(i);
                    data.push(diag);
                }
                diag_placed = true;
            }
            if !v.is_zero() {
                indices.push(j);
                data.push(v);
            }
        }

        if !diag_placed && !diag.is_zero() {
            indices.push(i);
            data.push(diag);
        }

        indptr.push(indices.len());
    }

    CsMat::new((rows, cols), indptr, indices, data)
}

/// Converts a sprs matrix to Yale storage
///
/// The matrix is brought into CSR form if needed; its raw triplet arrays
/// are then exactly the old-Yale boundary format.
pub fn from_csmat<T, I>(matrix: CsMat<T>) -> Result<YaleStorage<T, I>>
where
    T: Element + CastInto<T> + Default,
    I: IndexType,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    YaleStorage::from_old_yale(&[shape.0, shape.1], &indptr, &indices, &data)
}
