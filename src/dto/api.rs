//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

/// Body returned with every non-2xx API response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
