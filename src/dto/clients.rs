use serde::Serialize;

use crate::domain::client::Client;

/// Data required to render the clients page.
#[derive(Debug, Serialize)]
pub struct ClientsPageData {
    pub clients: Vec<Client>,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
}
