//! Pre-flight check for free-text attribute batches.
//!
//! # Responsibility
//! - Split free text into candidate names.
//! - Report which candidates would be accepted before anything is submitted.
//!
//! # Invariants
//! - Separators are `,`, `;` and newline; blank pieces are dropped.
//! - Duplicate and existing-name checks ignore case, unlike ingestion which
//!   compares exactly.
//! - Pure: no storage access.

use crate::model::name::CandidateName;
use std::collections::HashSet;

/// Result of previewing one free-text batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPreview {
    /// Sanitized names ready for submission, in input order.
    pub valid: Vec<String>,
    /// Human-readable reasons for every rejected piece, in input order.
    pub errors: Vec<String>,
}

impl BatchPreview {
    /// Whether at least one name would be submitted.
    pub fn is_submittable(&self) -> bool {
        !self.valid.is_empty()
    }
}

/// Splits batch input into trimmed, non-empty pieces.
pub fn split_batch_input(input: &str) -> Vec<&str> {
    input
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Previews `input` against the names already known to the caller.
pub fn preview_batch<S: AsRef<str>>(input: &str, existing_names: &[S]) -> BatchPreview {
    let existing = existing_names
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect::<HashSet<_>>();
    let mut seen = HashSet::new();
    let mut preview = BatchPreview::default();

    for piece in split_batch_input(input) {
        let candidate = CandidateName::parse(piece);
        if let Some(err) = candidate.error {
            preview.errors.push(format!("\"{piece}\" → {err}"));
            continue;
        }

        let sanitized = candidate.sanitized;
        let folded = sanitized.to_lowercase();
        if seen.contains(&folded) {
            preview
                .errors
                .push(format!("\"{sanitized}\" is duplicated in your input."));
            continue;
        }
        if existing.contains(&folded) {
            preview
                .errors
                .push(format!("\"{sanitized}\" already exists."));
            continue;
        }

        seen.insert(folded);
        preview.valid.push(sanitized);
    }

    preview
}
