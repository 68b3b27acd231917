//! Permission codes and permission sets.

pub mod model;

pub use model::{Permission, Permissions};
