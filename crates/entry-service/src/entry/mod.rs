//! Entry use cases.

pub mod query;
pub mod service;

pub use query::EntryQuery;
pub use service::EntryService;
