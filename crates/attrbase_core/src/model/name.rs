//! Attribute name normalization.
//!
//! # Responsibility
//! - Turn arbitrary user-supplied text into a canonical attribute name.
//! - Reject names that are empty or carry characters outside the allowed set.
//!
//! # Invariants
//! - Allowed characters are Unicode letters, Unicode numbers, ASCII space and `'`.
//! - `sanitize` never fails and is idempotent.
//! - `validate(sanitize(raw))` is `EmptyName` exactly when the sanitized value is empty.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static VALID_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} ']+$").expect("valid name regex"));
static BAD_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N} ']").expect("valid bad-chars regex"));

/// Reason a candidate name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// Nothing left after sanitizing.
    EmptyName,
    /// Contains characters outside letters, numbers, spaces and single quotes.
    InvalidCharacters,
}

impl Display for NameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Empty string"),
            Self::InvalidCharacters => write!(
                f,
                "Invalid chars; only letters, numbers, spaces, and single quotes allowed"
            ),
        }
    }
}

impl Error for NameValidationError {}

/// Sanitizes raw input into a candidate attribute name.
///
/// Trims surrounding whitespace and strips every disallowed character. Spaces
/// exposed at either edge by the stripping are trimmed as well, so applying
/// this twice yields the same value as applying it once.
pub fn sanitize(raw: &str) -> String {
    BAD_CHARS_RE
        .replace_all(raw.trim(), "")
        .trim_matches(' ')
        .to_string()
}

/// Validates an already sanitized name.
///
/// Returns `None` when the name is acceptable.
pub fn validate(name: &str) -> Option<NameValidationError> {
    if name.is_empty() {
        return Some(NameValidationError::EmptyName);
    }
    if !VALID_NAME_RE.is_match(name) {
        return Some(NameValidationError::InvalidCharacters);
    }
    None
}

/// Raw input paired with its sanitize/validate outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateName {
    /// Input exactly as received.
    pub raw: String,
    /// Result of [`sanitize`] over `raw`.
    pub sanitized: String,
    /// Result of [`validate`] over `sanitized`.
    pub error: Option<NameValidationError>,
}

impl CandidateName {
    /// Normalizes one raw input.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let sanitized = sanitize(&raw);
        let error = validate(&sanitized);
        Self {
            raw,
            sanitized,
            error,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}
