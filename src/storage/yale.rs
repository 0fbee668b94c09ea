//! New Yale storage descriptor and accessors
//!
//! New Yale is a compressed-row format with the diagonal pulled out into a
//! dense prefix for O(1) access. A descriptor owns two parallel buffers of
//! equal capacity:
//!
//! - `ija`: row pointers in `[0, rows]` (with `ija[rows]` doubling as the
//!   in-use size), then column indices of off-diagonal entries.
//! - `a`: the diagonal in `[0, rows)`, the canonical zero at `a[rows]`,
//!   then off-diagonal values parallel to the column indices.
//!
//! Within each row the off-diagonal column indices are kept strictly
//! increasing, so cell lookups are a binary search over the row's range.

use std::fmt;
use std::ops::Range;


use crate::constants::{max_capacity, min_capacity};
use crate::dtype::{DType, Element, IType, IndexType};
use crate::error::{Error, Result};
use crate::smmp::transpose_yale;
use crate::storage::search::{binary_search, insert_search};

/// A sparse matrix in New Yale format
///
/// Generic over the element type `T` and the index type `I`; the default
/// `u32` index is wide enough for any shape a dense pass could touch in
/// practice. The descriptor exclusively owns its buffers; dropping it
/// releases everything.
#[derive(Clone)]
pub struct YaleStorage<T, I = u32> {
    /// Matrix shape as `[rows, cols]`
    pub(crate) shape: [usize; 2],

    /// Allocated length of both buffers, in elements
    pub(crate) capacity: usize,

    /// Count of off-diagonal stored entries
    pub(crate) ndnz: usize,

    /// Row pointers followed by off-diagonal column indices
    pub(crate) ija: Vec<I>,

    /// Diagonal, canonical zero, then off-diagonal values
    pub(crate) a: Vec<T>,
}

/// Outcome of a [`YaleStorage::set`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetResult {
    /// A new off-diagonal entry was inserted
    Inserted,
    /// An existing cell (diagonal or stored off-diagonal) was overwritten
    Replaced,
}

/// Read handle returned by [`YaleStorage::ref_at`]
///
/// Missing cells resolve to the canonical zero slot at `a[rows]`. The zero
/// handle is a distinct variant so callers cannot mistake it for a stored
/// entry and write through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef<'a, T> {
    /// Handle to an explicitly stored cell (diagonal or off-diagonal)
    Stored(&'a T),
    /// Read-only handle to the canonical zero
    Zero(&'a T),
}

impl<'a, T> CellRef<'a, T> {
    /// The value this handle resolves to
    #[inline]
    pub fn value(&self) -> &'a T {
        match self {
            CellRef::Stored(v) | CellRef::Zero(v) => v,
        }
    }

    /// Returns true if the cell is explicitly stored
    #[inline]
    pub fn is_stored(&self) -> bool {
        matches!(self, CellRef::Stored(_))
    }
}

impl<T, I> YaleStorage<T, I>
where
    T: Element,
    I: IndexType,
{
    /// Creates an empty descriptor with the requested initial capacity
    ///
    /// The capacity is clamped to the valid range for the shape: at least
    /// [`min_capacity`], at most [`max_capacity`] (`rows * cols + 1`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeUnsupported`] unless `shape` has rank 2.
    pub fn create(shape: &[usize], init_capacity: usize) -> Result<Self> {
        if shape.len() != 2 {
            return Err(Error::ShapeUnsupported { rank: shape.len() });
        }

        let shape = [shape[0], shape[1]];
        let min = min_capacity(shape[0]);
        let max = max_capacity(shape[0], shape[1]);

        // The minimum wins over the maximum for degenerate shapes; the
        // buffers must always hold the row pointers and the canonical zero.
        let capacity = if init_capacity < min {
            min
        } else if init_capacity > max {
            max.max(min)
        } else {
            init_capacity
        };

        Ok(Self::with_capacity(shape, capacity))
    }

    /// Creates an empty matrix of the given dimensions with minimal capacity
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::with_capacity([rows, cols], min_capacity(rows))
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let mut s = Self::zeros(n, n);
        for d in s.a[..n].iter_mut() {
            *d = T::one();
        }
        s
    }

    /// Allocates zero-filled buffers of exactly `capacity` elements and
    /// initializes the empty state. Callers are responsible for choosing a
    /// capacity that covers the row-pointer prefix.
    pub(crate) fn with_capacity(shape: [usize; 2], capacity: usize) -> Self {
        debug_assert!(capacity > shape[0] + 1, "capacity too small for shape");

        let mut s = YaleStorage {
            shape,
            capacity,
            ndnz: 0,
            ija: vec![I::zero(); capacity],
            a: vec![T::zero(); capacity],
        };
        s.init();
        s
    }

    /// Resets the descriptor to the empty state
    ///
    /// All row pointers are set to `rows + 1` (every row empty), the
    /// diagonal and the canonical zero are cleared. Idempotent; capacity is
    /// retained.
    pub fn init(&mut self) {
        let rows = self.shape[0];
        let sentinel = IndexType::from_usize(rows + 1);

        for p in self.ija[..=rows].iter_mut() {
            *p = sentinel;
        }
        for v in self.a[..=rows].iter_mut() {
            *v = T::zero();
        }
        self.ndnz = 0;
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Matrix shape as `[rows, cols]`
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Allocated length of both buffers, in elements
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of off-diagonal stored entries
    #[inline]
    pub fn ndnz(&self) -> usize {
        self.ndnz
    }

    /// Total in-use length of both buffers (`ija[rows]`)
    #[inline]
    pub fn size(&self) -> usize {
        self.ija[self.shape[0]].as_usize()
    }

    /// Runtime tag of the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Runtime tag of the index type
    #[inline]
    pub fn itype(&self) -> IType {
        I::ITYPE
    }

    /// The in-use prefix of the IJA buffer: row pointers, then the column
    /// indices of all off-diagonal stored entries
    #[inline]
    pub fn ija(&self) -> &[I] {
        &self.ija[..self.size()]
    }

    /// The in-use prefix of the A buffer: diagonal, canonical zero, then
    /// the values of all off-diagonal stored entries
    #[inline]
    pub fn a(&self) -> &[T] {
        &self.a[..self.size()]
    }

    /// The row-pointer prefix `ija[0..=rows]`
    #[inline]
    pub fn row_pointers(&self) -> &[I] {
        &self.ija[..=self.shape[0]]
    }

    /// The dense diagonal `a[0..rows]`
    #[inline]
    pub fn diagonal(&self) -> &[T] {
        &self.a[..self.shape[0]]
    }

    /// Start and end positions of row `i`'s off-diagonal range
    #[inline]
    pub(crate) fn row_range(&self, i: usize) -> (usize, usize) {
        (self.ija[i].as_usize(), self.ija[i + 1].as_usize())
    }

    /// Returns an iterator over the off-diagonal stored entries in row `i`
    ///
    /// Each item is a `(column, value)` pair; columns arrive in strictly
    /// increasing order. The diagonal cell is not included; read it from
    /// [`diagonal`](Self::diagonal).
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.shape[0], "row index out of bounds");

        let (start, end) = self.row_range(i);
        self.ija[start..end]
            .iter()
            .zip(&self.a[start..end])
            .map(|(&c, v)| (c.as_usize(), v))
    }

    /// Returns a read handle for the cell at `(r, c)`
    ///
    /// Diagonal cells and stored off-diagonal entries resolve to
    /// [`CellRef::Stored`]; anything else resolves to [`CellRef::Zero`],
    /// the canonical zero at `a[rows]`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn ref_at(&self, r: usize, c: usize) -> CellRef<'_, T> {
        assert!(
            r < self.shape[0] && c < self.shape[1],
            "coordinates ({}, {}) out of bounds for {}x{} matrix",
            r,
            c,
            self.shape[0],
            self.shape[1]
        );

        if r == c {
            return CellRef::Stored(&self.a[r]);
        }

        let (start, end) = self.row_range(r);
        if start == end {
            return CellRef::Zero(&self.a[self.shape[0]]);
        }

        match binary_search(&self.ija, start, end - 1, IndexType::from_usize(c)) {
            Some(pos) => CellRef::Stored(&self.a[pos]),
            None => CellRef::Zero(&self.a[self.shape[0]]),
        }
    }

    /// Reads the cell at `(r, c)` by value
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        *self.ref_at(r, c).value()
    }

    /// Writes `v` into the cell at `(r, c)`, inserting a new off-diagonal
    /// entry if the cell was not stored yet
    ///
    /// Insertions may grow both buffers geometrically; all layout
    /// invariants hold on return.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the insertion would exceed
    /// the shape's maximum size, or [`Error::AllocationFailed`] if a
    /// required resize cannot allocate. The matrix is unchanged on error.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, r: usize, c: usize, v: T) -> Result<SetResult> {
        assert!(
            r < self.shape[0] && c < self.shape[1],
            "coordinates ({}, {}) out of bounds for {}x{} matrix",
            r,
            c,
            self.shape[0],
            self.shape[1]
        );

        if r == c {
            self.a[r] = v;
            return Ok(SetResult::Replaced);
        }

        let (start, end) = self.row_range(r);
        if start == end {
            // empty row: the row pointer is already the insertion position
            self.vector_insert(start, &[c], Some(&[v]))?;
            self.increment_ia_after(r, 1);
            self.ndnz += 1;
            return Ok(SetResult::Inserted);
        }

        let (pos, found) = insert_search(&self.ija, start, end - 1, IndexType::from_usize(c));
        if found {
            self.a[pos] = v;
            return Ok(SetResult::Replaced);
        }

        self.vector_insert(pos, &[c], Some(&[v]))?;
        self.increment_ia_after(r, 1);
        self.ndnz += 1;
        Ok(SetResult::Inserted)
    }

    /// Multi-cell reads are not supported; single cells go through
    /// [`ref_at`](Self::ref_at).
    pub fn slice(&self, _rows: Range<usize>, _cols: Range<usize>) -> Result<Self> {
        Err(Error::Unimplemented("general slicing"))
    }

    /// Visits every live value slot in `a[0..size]`
    ///
    /// This is the hook a host runtime with a tracing collector uses to
    /// mark boxed elements; the diagonal, the canonical zero, and all
    /// off-diagonal values are visited exactly once.
    pub fn visit_stored<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for v in &self.a[..self.size()] {
            f(v);
        }
    }

    /// Produces the transposed matrix in a fresh descriptor
    ///
    /// Rows become columns via a two-pass placement: the first pass counts
    /// entries per output row to lay out the row pointers, the second drops
    /// each entry into the next free slot of its destination row, which
    /// leaves every output row sorted. The diagonal carries over directly.
    pub fn transpose(&self) -> Self {
        let t_shape = [self.shape[1], self.shape[0]];
        let needed = self.shape[1] + 1 + self.ndnz;
        let mut t = Self::with_capacity(t_shape, needed.max(min_capacity(t_shape[0])));

        transpose_yale(self.shape, &self.ija, &self.a, &mut t.ija, &mut t.a);
        t.ndnz = self.ndnz;
        t
    }
}

impl<T, I> fmt::Debug for YaleStorage<T, I>
where
    T: Element,
    I: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "YaleStorage {{")?;
        writeln!(f, "  dimensions: {} × {}", self.shape[0], self.shape[1])?;
        writeln!(
            f,
            "  size: {}, capacity: {}, ndnz: {}",
            self.size(),
            self.capacity,
            self.ndnz
        )?;

        let max_rows_to_print = 5.min(self.shape[0]);
        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: diag {:?} |", i, self.a[i])?;
                for (c, v) in self.row_iter(i).take(5) {
                    write!(f, " ({}, {:?})", c, v)?;
                }
                let width = {
                    let (start, end) = self.row_range(i);
                    end - start
                };
                if width > 5 {
                    write!(f, " ... ({} more)", width - 5)?;
                }
                writeln!(f)?;
            }

            if self.shape[0] > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.shape[0] - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_create_clamps_capacity() {
        let m = YaleStorage::<f64, u32>::create(&[3, 3], 1).unwrap();
        assert_eq!(m.capacity(), 7); // clamped up to the minimum

        let m = YaleStorage::<f64, u32>::create(&[3, 3], 100).unwrap();
        assert_eq!(m.capacity(), 10); // clamped down to rows * cols + 1

        let m = YaleStorage::<f64, u32>::create(&[3, 3], 8).unwrap();
        assert_eq!(m.capacity(), 8);
    }

    #[test]
    fn test_create_rejects_bad_rank() {
        let err = YaleStorage::<f64, u32>::create(&[3, 3, 3], 4).unwrap_err();
        assert_eq!(err, Error::ShapeUnsupported { rank: 3 });
    }

    #[test]
    fn test_empty_state() {
        let m = YaleStorage::<f64, u32>::zeros(3, 3);

        assert_eq!(m.size(), 4);
        assert_eq!(m.ndnz(), 0);
        assert_eq!(m.row_pointers().to_vec(), vec![4, 4, 4, 4]);
        assert_eq!(m.diagonal().to_vec(), vec![0.0, 0.0, 0.0]);
        // the canonical zero slot
        assert_eq!(m.a()[3], 0.0);
    }

    #[test]
    fn test_set_and_ref_diagonal() {
        let mut m = YaleStorage::<f64, u32>::zeros(3, 3);

        assert_eq!(m.set(1, 1, 2.5).unwrap(), SetResult::Replaced);
        assert_eq!(m.get(1, 1), 2.5);
        assert!(m.ref_at(1, 1).is_stored());
        // diagonal writes never consume off-diagonal space
        assert_eq!(m.size(), 4);
        assert_eq!(m.ndnz(), 0);
    }

    #[test]
    fn test_missing_cell_returns_zero_handle() {
        let m = YaleStorage::<f64, u32>::zeros(3, 3);

        let handle = m.ref_at(0, 2);
        assert!(!handle.is_stored());
        assert_eq!(*handle.value(), 0.0);
    }

    #[test]
    fn test_set_inserts_and_replaces() {
        let mut m = YaleStorage::<f64, u32>::zeros(3, 3);

        assert_eq!(m.set(0, 2, 7.0).unwrap(), SetResult::Inserted);
        assert_eq!(m.ndnz(), 1);
        assert_eq!(m.size(), 5);

        assert_eq!(m.set(0, 2, 8.0).unwrap(), SetResult::Replaced);
        assert_eq!(m.ndnz(), 1);
        assert_eq!(m.size(), 5);
        assert_eq!(m.get(0, 2), 8.0);
    }

    #[test]
    fn test_insert_before_existing_entry() {
        let mut m = YaleStorage::<f64, u32>::zeros(3, 3);

        m.set(0, 2, 7.0).unwrap();
        m.set(0, 1, 5.0).unwrap();

        assert_eq!(m.row_pointers().to_vec(), vec![4, 6, 6, 6]);
        assert_eq!(m.ija()[4..6].to_vec(), vec![1, 2]);
        assert_eq!(m.a()[4..6].to_vec(), vec![5.0, 7.0]);
    }

    #[test]
    fn test_init_resets() {
        let mut m = YaleStorage::<f64, u32>::zeros(3, 3);
        m.set(0, 0, 1.0).unwrap();
        m.set(1, 2, 4.0).unwrap();
        let capacity = m.capacity();

        m.init();

        assert_eq!(m.size(), 4);
        assert_eq!(m.ndnz(), 0);
        assert_eq!(m.capacity(), capacity);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(1, 2), 0.0);

        // idempotent
        m.init();
        assert_eq!(m.size(), 4);
    }

    #[test]
    fn test_identity() {
        let m = YaleStorage::<i32, u32>::identity(3);

        assert_eq!(m.diagonal().to_vec(), vec![1, 1, 1]);
        assert_eq!(m.ndnz(), 0);
        assert_eq!(m.size(), 4);
    }

    #[test]
    fn test_row_iter() {
        let mut m = YaleStorage::<i32, u32>::zeros(3, 4);
        m.set(1, 3, 9).unwrap();
        m.set(1, 0, 7).unwrap();

        let row: Vec<_> = m.row_iter(1).map(|(c, &v)| (c, v)).collect();
        assert_eq!(row, vec![(0, 7), (3, 9)]);
        assert_eq!(m.row_iter(0).count(), 0);
    }

    #[test]
    fn test_slice_unimplemented() {
        let m = YaleStorage::<f64, u32>::zeros(3, 3);
        let err = m.slice(0..2, 0..2).unwrap_err();
        assert_eq!(err, Error::Unimplemented("general slicing"));
    }

    #[test]
    fn test_visit_stored_covers_live_slots() {
        let mut m = YaleStorage::<i32, u32>::zeros(3, 3);
        m.set(0, 1, 5).unwrap();
        m.set(2, 0, 6).unwrap();

        let mut visited = 0;
        m.visit_stored(|_| visited += 1);
        // diagonal (3) + canonical zero (1) + off-diagonal entries (2)
        assert_eq!(visited, 6);
    }

    #[test]
    fn test_small_index_type() {
        let mut m = YaleStorage::<f64, u8>::zeros(4, 4);
        m.set(0, 3, 1.5).unwrap();
        m.set(3, 0, 2.5).unwrap();

        assert_eq!(m.get(0, 3), 1.5);
        assert_eq!(m.get(3, 0), 2.5);
        assert_eq!(m.itype(), crate::dtype::IType::U8);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds() {
        let mut m = YaleStorage::<f64, u32>::zeros(2, 2);
        let _ = m.set(2, 0, 1.0);
    }
}
