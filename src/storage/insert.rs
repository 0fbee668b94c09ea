//! Insertion and resize protocol for the IJA and A buffers
//!
//! All mutations that add entries to the off-diagonal region funnel through
//! [`YaleStorage::vector_insert`]. It opens a gap of `n` positions at the
//! insertion point, growing both buffers geometrically when the in-use size
//! would exceed capacity, and leaves every byte outside the gap untouched.


use crate::constants::{max_capacity, GROWTH_CONSTANT};
use crate::dtype::{Element, IndexType};
use crate::error::{Error, Result};
use crate::storage::yale::YaleStorage;

impl<T, I> YaleStorage<T, I>
where
    T: Element,
    I: IndexType,
{
    /// Inserts `cols.len()` column/value pairs at contiguous positions
    /// starting at `pos`
    ///
    /// `vals` of `None` performs a structure-only insertion: the column
    /// indices are placed but the value buffer is neither shifted nor
    /// written, which is what structural passes that fill values later
    /// want. The caller must have established that no existing entry
    /// occupies the target columns, and must follow up with
    /// [`increment_ia_after`](Self::increment_ia_after).
    ///
    /// # Errors
    ///
    /// - [`Error::PreconditionViolated`] if `pos` lies inside the
    ///   row-pointer region.
    /// - [`Error::CapacityExceeded`] if the insertion cannot fit within the
    ///   shape's maximum size.
    /// - [`Error::AllocationFailed`] if replacement buffers cannot be
    ///   allocated. The matrix is unchanged on any error.
    pub(crate) fn vector_insert(
        &mut self,
        pos: usize,
        cols: &[usize],
        vals: Option<&[T]>,
    ) -> Result<()> {
        if pos < self.rows() + 1 {
            return Err(Error::PreconditionViolated(
                "insert position lies inside the row-pointer region",
            ));
        }
        if let Some(vals) = vals {
            debug_assert_eq!(cols.len(), vals.len());
        }

        let n = cols.len();
        let size = self.size();

        if size + n > self.capacity {
            self.resize_for_insert(size, pos, n)?;
        } else {
            self.ija.copy_within(pos..size, pos + n);
            if vals.is_some() {
                self.a.copy_within(pos..size, pos + n);
            }
        }

        for (k, &col) in cols.iter().enumerate() {
            self.ija[pos + k] = IndexType::from_usize(col);
        }
        if let Some(vals) = vals {
            self.a[pos..pos + n].copy_from_slice(vals);
        }

        Ok(())
    }

    /// Replaces both buffers with larger ones, leaving a gap of `n`
    /// positions at `pos`
    ///
    /// The new capacity is the geometric growth of the old one, raised to
    /// fit the insertion and capped at the shape's maximum. Both
    /// replacement buffers are allocated before either old buffer is
    /// released, so an allocation failure leaves the descriptor untouched.
    fn resize_for_insert(&mut self, size: usize, pos: usize, n: usize) -> Result<()> {
        let max = max_capacity(self.rows(), self.cols());

        let mut new_capacity = (self.capacity as f64 * GROWTH_CONSTANT) as usize;
        if new_capacity < size + n {
            new_capacity = size + n;
        }
        if new_capacity > max {
            new_capacity = max;
            if size + n > max {
                return Err(Error::CapacityExceeded { max_capacity: max });
            }
        }

        let mut new_ija: Vec<I> = Vec::new();
        new_ija
            .try_reserve_exact(new_capacity)
            .map_err(|_| Error::AllocationFailed {
                capacity: new_capacity,
            })?;
        let mut new_a: Vec<T> = Vec::new();
        new_a
            .try_reserve_exact(new_capacity)
            .map_err(|_| Error::AllocationFailed {
                capacity: new_capacity,
            })?;

        // Prefix up to the insertion site, gap of n, then the shifted tail.
        // The value buffer is copied the same way even for structure-only
        // insertions so the diagonal region survives the reallocation.
        new_ija.extend_from_slice(&self.ija[..pos]);
        new_ija.resize(pos + n, I::zero());
        new_ija.extend_from_slice(&self.ija[pos..size]);
        new_ija.resize(new_capacity, I::zero());

        new_a.extend_from_slice(&self.a[..pos]);
        new_a.resize(pos + n, T::zero());
        new_a.extend_from_slice(&self.a[pos..size]);
        new_a.resize(new_capacity, T::zero());

        self.ija = new_ija;
        self.a = new_a;
        self.capacity = new_capacity;

        Ok(())
    }

    /// Accounts for `n` entries added to row `i`: every row pointer after
    /// `i`, including the size sentinel, moves up by `n`
    ///
    /// Must be called exactly once per insertion.
    pub(crate) fn increment_ia_after(&mut self, i: usize, n: usize) {
        let rows = self.rows();
        let n = IndexType::from_usize(n);

        for p in self.ija[i + 1..=rows].iter_mut() {
            *p = *p + n;
        }
    }
}
