//! Domain model for the attribute registry.
//!
//! # Responsibility
//! - Define the persisted `Attribute` record.
//! - Own the name normalization rules shared by every write path.

pub mod attribute;
pub mod name;
