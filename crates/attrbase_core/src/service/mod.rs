//! Attribute use-case services.
//!
//! # Responsibility
//! - Orchestrate normalization and repository calls into use-case APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod draft_service;
pub mod ingest_service;
pub mod query_service;
