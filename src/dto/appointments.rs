use serde::Serialize;

use crate::domain::appointment::AppointmentDetails;
use crate::domain::client::Client;
use crate::domain::service::Service;
use crate::domain::types::Price;

/// Data required to render the appointments page and its booking dialog.
#[derive(Debug, Serialize)]
pub struct AppointmentsPageData {
    /// Filtered appointments ordered by start time.
    pub appointments: Vec<AppointmentDetails>,
    /// Full client list for the dialog picker.
    pub clients: Vec<Client>,
    /// Full catalog for the dialog picker.
    pub services: Vec<Service>,
    pub search_query: Option<String>,
}

/// Appointment row as rendered in the list, with its total precomputed.
#[derive(Debug, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub details: AppointmentDetails,
    pub total_price: Price,
}

impl From<AppointmentDetails> for AppointmentView {
    fn from(details: AppointmentDetails) -> Self {
        Self {
            total_price: details.total_price(),
            details,
        }
    }
}
