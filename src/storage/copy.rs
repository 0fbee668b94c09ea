//! Copying, dtype-converting copies, and old-Yale import/export
//!
//! Structural copies duplicate the IJA prefix and the descriptor metadata
//! but not the value buffer; cast-copies additionally convert every in-use
//! value into the target element type. The old-Yale triplet form
//! `(IA, JA, A)`, where each row lists all of its nonzeros including the
//! diagonal, is the one boundary format parsed and emitted here.

use num_traits::ToPrimitive;

use crate::dtype::{CastInto, Element, IndexType};
use crate::error::{Error, Result};
use crate::storage::yale::YaleStorage;

impl<T, I> YaleStorage<T, I>
where
    T: Element,
    I: IndexType,
{
    /// Allocates a descriptor of a possibly different element type with the
    /// same shape and structure
    ///
    /// Copies the first `size` entries of IJA and the `ndnz` count; the
    /// value buffer of the copy stays zero-filled. `new_capacity` is raised
    /// to the in-use size if it would not fit the structure.
    pub(crate) fn copy_alloc_struct<U: Element>(&self, new_capacity: usize) -> YaleStorage<U, I> {
        let size = self.size();
        let mut out = YaleStorage::<U, I>::with_capacity(self.shape, new_capacity.max(size));

        out.ndnz = self.ndnz;
        out.ija[..size].copy_from_slice(&self.ija[..size]);
        out
    }

    /// Full copy with element conversion into `U`
    ///
    /// Every in-use slot of the value buffer (diagonal, canonical zero, and
    /// off-diagonal values) is converted with the promotion cast. For
    /// `U = T` the conversion is the identity and the whole copy reduces to
    /// a pair of buffer copies.
    pub fn cast_copy<U>(&self) -> YaleStorage<U, I>
    where
        T: CastInto<U>,
        U: Element,
    {
        let size = self.size();
        let mut out = self.copy_alloc_struct::<U>(self.capacity);

        for p in 0..size {
            out.a[p] = self.a[p].cast_into();
        }
        out
    }

    /// Builds a matrix from old-Yale triplet vectors
    ///
    /// `ia[i]..ia[i + 1]` spans the entries of row `i` in `ja`/`vals`,
    /// diagonal included. Two passes: the first counts the off-diagonal
    /// entries to size the buffers exactly, the second splits each row into
    /// the dense diagonal slot and the compressed off-diagonal region.
    /// Input values are converted into `T` on the way in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeUnsupported`] unless `shape` has rank 2.
    pub fn from_old_yale<J, F>(shape: &[usize], ia: &[J], ja: &[J], vals: &[F]) -> Result<Self>
    where
        J: ToPrimitive + Copy,
        F: CastInto<T>,
    {
        if shape.len() != 2 {
            return Err(Error::ShapeUnsupported { rank: shape.len() });
        }

        let rows = shape[0];
        let cols = shape[1];
        debug_assert_eq!(ia.len(), rows + 1);

        let row_span = |i: usize| {
            let start = ia[i].to_usize().unwrap_or(0);
            let end = ia[i + 1].to_usize().unwrap_or(0);
            start..end
        };

        // Pass 1: count the off-diagonal nonzeros to size the allocation.
        let mut ndnz = 0;
        for i in 0..rows {
            for p in row_span(i) {
                if ja[p].to_usize().unwrap_or(0) != i {
                    ndnz += 1;
                }
            }
        }

        let capacity = (rows + ndnz + 1).max(rows + 2);
        let mut s = Self::with_capacity([rows, cols], capacity);

        // Pass 2: diagonal entries land in the dense prefix, everything
        // else packs contiguously after the row-pointer region.
        let mut pp = rows + 1;
        for i in 0..rows {
            s.ija[i] = IndexType::from_usize(pp);

            for p in row_span(i) {
                let j = ja[p].to_usize().unwrap_or(0);
                let v: T = vals[p].cast_into();

                if j == i {
                    s.a[i] = v;
                } else {
                    s.ija[pp] = IndexType::from_usize(j);
                    s.a[pp] = v;
                    pp += 1;
                }
            }
        }

        s.ija[rows] = IndexType::from_usize(pp);
        s.a[rows] = T::zero();
        s.ndnz = ndnz;

        Ok(s)
    }

    /// Exports the matrix as old-Yale triplet vectors
    ///
    /// Each row lists its diagonal entry first (omitted when zero) followed
    /// by the stored off-diagonal entries in column order.
    pub fn to_old_yale(&self) -> (Vec<I>, Vec<I>, Vec<T>) {
        let rows = self.rows();
        let cols = self.cols();

        let mut ia = Vec::with_capacity(rows + 1);
        let mut ja = Vec::new();
        let mut vals = Vec::new();

        ia.push(I::zero());
        for i in 0..rows {
            if i < cols && !self.a[i].is_zero() {
                ja.push(IndexType::from_usize(i));
                vals.push(self.a[i]);
            }

            let (start, end) = self.row_range(i);
            ja.extend_from_slice(&self.ija[start..end]);
            vals.extend_from_slice(&self.a[start..end]);

            ia.push(IndexType::from_usize(ja.len()));
        }

        (ia, ja, vals)
    }
}
