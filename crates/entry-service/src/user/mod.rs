//! User registration and authentication.

pub mod service;

pub use service::{RegisterUser, UserService};
