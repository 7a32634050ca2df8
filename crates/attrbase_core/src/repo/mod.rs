//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the attribute services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate the attribute name before any SQL mutation.
//! - Uniqueness violations surface as `RepoError::DuplicateName`, not as a
//!   transport error.

pub mod attribute_repo;
