//! Attribute ingestion use-case.
//!
//! # Responsibility
//! - Convert a batch of raw strings into persisted attributes.
//! - Report every input as either created or skipped.
//!
//! # Invariants
//! - Items are processed strictly in input order, one at a time, so the
//!   existence check for item N observes inserts of items before it.
//! - `created.len() + skipped.len()` equals the number of inputs.
//! - Invalid items are reported with their raw text, duplicates with their
//!   sanitized name.
//! - The batch is not transactional: a storage failure leaves earlier
//!   inserts in place.

use crate::model::attribute::Attribute;
use crate::model::name::CandidateName;
use crate::repo::attribute_repo::{AttributeRepository, RepoError, RepoResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Partition of one ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// Sanitized names that were inserted, in input order.
    pub created: Vec<String>,
    /// Duplicates (sanitized name) and rejects (`"<raw> → <reason>"`), in
    /// input order.
    pub skipped: Vec<String>,
}

/// Use-case service for creating attributes from raw input.
pub struct AttributeIngestService<R: AttributeRepository> {
    repo: R,
}

impl<R: AttributeRepository> AttributeIngestService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Normalizes, deduplicates and persists each raw item.
    ///
    /// # Errors
    /// Returns the first storage error other than a uniqueness violation.
    /// Items processed before the failure stay persisted.
    pub fn create_attributes<S: AsRef<str>>(&self, raw_items: &[S]) -> RepoResult<IngestOutcome> {
        let started_at = Instant::now();
        let mut outcome = IngestOutcome::default();

        for raw in raw_items {
            let candidate = CandidateName::parse(raw.as_ref());
            if let Some(err) = candidate.error {
                outcome.skipped.push(format!("{} → {err}", candidate.raw));
                continue;
            }

            let name = candidate.sanitized;
            if self.repo.find_by_name(&name)?.is_some() {
                outcome.skipped.push(name);
                continue;
            }

            match self.repo.create_attribute(&Attribute::new(name.as_str())) {
                Ok(_) => outcome.created.push(name),
                Err(RepoError::DuplicateName(_)) => {
                    debug!("event=attribute_ingest module=service status=race_duplicate");
                    outcome.skipped.push(name);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "event=attribute_ingest module=service status=ok received={} created={} skipped={} duration_ms={}",
            raw_items.len(),
            outcome.created.len(),
            outcome.skipped.len(),
            started_at.elapsed().as_millis()
        );
        Ok(outcome)
    }
}
