//! # entry-entity
//!
//! Domain entity models for the entry directory. Every struct in this
//! crate represents a database table row or a domain value object.
//! Database entities additionally derive `sqlx::FromRow`, and entities
//! accepted from clients derive `validator::Validate`.

pub mod entry;
pub mod permission;
pub mod user;
