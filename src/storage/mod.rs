// Storage descriptor and the operations that act on it

mod compare;
mod copy;
mod insert;
mod merge;
mod search;
mod yale;

pub use compare::eqeq;
pub use merge::create_merged;
pub use yale::{CellRef, SetResult, YaleStorage};
