//! Free-text filtering over fully loaded collections.
//!
//! Matching is a case-insensitive substring test against the fields each
//! entity exposes through [`Searchable`]. A blank query keeps every item.

use crate::domain::appointment::AppointmentDetails;
use crate::domain::client::Client;
use crate::domain::service::Service;

/// Entities that can be narrowed by a free-text query.
pub trait Searchable {
    /// Returns `true` when any searchable field contains `needle`.
    ///
    /// `needle` is already lower-cased and trimmed.
    fn matches(&self, needle: &str) -> bool;
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Searchable for Client {
    fn matches(&self, needle: &str) -> bool {
        contains(self.name.as_str(), needle)
            || self
                .phone
                .as_ref()
                .is_some_and(|phone| contains(phone.as_str(), needle))
    }
}

impl Searchable for Service {
    fn matches(&self, needle: &str) -> bool {
        contains(self.name.as_str(), needle)
    }
}

impl Searchable for AppointmentDetails {
    fn matches(&self, needle: &str) -> bool {
        self.client.matches(needle)
            || self
                .services
                .iter()
                .any(|line| contains(line.name.as_str(), needle))
    }
}

/// Keeps the items matching `query`, preserving their order.
pub fn filter<T: Searchable>(items: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches(&needle))
        .collect()
}
