//! Core traits defined in `entry-core` and implemented by other crates.

pub mod repository;

pub use repository::VersionedRepository;
