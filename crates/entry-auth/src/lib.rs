//! # entry-auth
//!
//! Authentication and authorization for the entry directory.
//!
//! ## Modules
//!
//! - `jwt`: authentication token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `permission`: permission-code enforcement

pub mod jwt;
pub mod password;
pub mod permission;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use permission::PermissionEnforcer;
