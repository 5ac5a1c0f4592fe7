use serde::Serialize;

use crate::domain::service::Service;

/// Data required to render the services page.
#[derive(Debug, Serialize)]
pub struct ServicesPageData {
    pub services: Vec<Service>,
    pub search_query: Option<String>,
}
