//! Sparse matrix multiplication and transposition kernels
//!
//! The multiplication follows the classic three-phase scheme: a symbolic
//! pass lays out the product's structure, a numeric pass fills in values
//! through a scatter/gather accumulator, and a per-row column sort restores
//! sortedness. All kernels operate directly on New Yale buffers, where the
//! dense diagonal prefix acts as an implicit entry at `(i, i)` of each row.

pub mod numeric;
pub mod reference;
pub mod sort;
pub mod symbolic;
pub mod transpose;

pub use numeric::numbmm;
pub use reference::reference_multiply;
pub use sort::sort_row_columns;
pub use symbolic::symbmm;
pub use transpose::transpose_yale;
