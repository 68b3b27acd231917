//! Directory entry entities.

pub mod model;
pub mod patch;
pub mod rules;

pub use model::{Entry, NewEntry};
pub use patch::EntryPatch;
pub use rules::SORT_SAFELIST;
