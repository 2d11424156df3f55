//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus `Deserialize` DTOs for the write paths that need
//! them.

pub mod campaign;
pub mod contact;
pub mod event;
pub mod send;
pub mod suppression;
