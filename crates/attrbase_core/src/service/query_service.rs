//! Attribute retrieval use-case.
//!
//! # Responsibility
//! - Select between search, random sample and full listing.
//! - Report the size of the set the result was drawn from.
//!
//! # Invariants
//! - A non-empty `search` wins over `limit`; `total` is the match count.
//! - A positive `limit` samples uniformly from the full set; `total` is the
//!   full set size, not the sample size.
//! - `limit == 0` means no limit. The full listing keeps storage order.
//!
//! Sampling fetches the whole table and shuffles in memory, so its cost is
//! linear in the table size.

use crate::model::attribute::Attribute;
use crate::repo::attribute_repo::{AttributeRepository, RepoResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Retrieval options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeQuery {
    /// Sample size. `0` disables sampling.
    pub limit: usize,
    /// Case-insensitive substring filter. Empty disables search.
    pub search: Option<String>,
}

/// Retrieval mode selected from an [`AttributeQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode<'a> {
    Search(&'a str),
    Sample(usize),
    All,
}

impl AttributeQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn sample(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Resolves which retrieval path applies.
    pub fn mode(&self) -> QueryMode<'_> {
        match self.search.as_deref() {
            Some(text) if !text.is_empty() => QueryMode::Search(text),
            _ if self.limit > 0 => QueryMode::Sample(self.limit),
            _ => QueryMode::All,
        }
    }
}

/// List envelope returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeList {
    pub data: Vec<Attribute>,
    pub total: usize,
}

/// Use-case service for reading attributes.
pub struct AttributeQueryService<R: AttributeRepository> {
    repo: R,
}

impl<R: AttributeRepository> AttributeQueryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Retrieves attributes using the thread-local random source for sampling.
    pub fn get_attributes(&self, query: &AttributeQuery) -> RepoResult<AttributeList> {
        self.get_attributes_with_rng(query, &mut rand::thread_rng())
    }

    /// Retrieves attributes, drawing samples from `rng`.
    pub fn get_attributes_with_rng<G: Rng + ?Sized>(
        &self,
        query: &AttributeQuery,
        rng: &mut G,
    ) -> RepoResult<AttributeList> {
        match query.mode() {
            QueryMode::Search(text) => {
                let data = self.repo.search_attributes(text)?;
                let total = data.len();
                Ok(AttributeList { data, total })
            }
            QueryMode::Sample(limit) => {
                let mut data = self.repo.list_attributes()?;
                let total = data.len();
                data.shuffle(rng);
                data.truncate(limit);
                Ok(AttributeList { data, total })
            }
            QueryMode::All => {
                let data = self.repo.list_attributes()?;
                let total = data.len();
                Ok(AttributeList { data, total })
            }
        }
    }
}
