//! DTO modules that bridge services with templates and APIs.

use serde::Deserialize;

pub mod api;
pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod main;

/// `?search=` query accepted by every list page and list endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
