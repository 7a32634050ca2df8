//! Core domain logic for the attribute registry.
//! This crate is the single source of truth for naming and uniqueness rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::attribute::{Attribute, AttributeId};
pub use model::name::{sanitize, validate, CandidateName, NameValidationError};
pub use repo::attribute_repo::{
    AttributeRepository, RepoError, RepoResult, SqliteAttributeRepository,
};
pub use service::draft_service::{preview_batch, split_batch_input, BatchPreview};
pub use service::ingest_service::{AttributeIngestService, IngestOutcome};
pub use service::query_service::{AttributeList, AttributeQuery, AttributeQueryService, QueryMode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
