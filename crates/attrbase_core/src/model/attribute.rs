//! Attribute domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the attribute registry.
//!
//! # Invariants
//! - `id` is generated once and never reused for another attribute.
//! - `name` is the output of [`sanitize`](crate::model::name::sanitize) and
//!   is unique across all attributes (exact, case-sensitive comparison).

use crate::model::name::{validate, NameValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an attribute record.
pub type AttributeId = Uuid;

/// Canonical attribute record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
}

impl Attribute {
    /// Creates a new attribute with a generated stable ID.
    ///
    /// The name is expected to be sanitized already; it is checked again by
    /// the repository before persistence.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an attribute with a caller-provided ID.
    pub fn with_id(id: AttributeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Checks the name against the normalizer rules.
    pub fn validate(&self) -> Result<(), NameValidationError> {
        match validate(&self.name) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
