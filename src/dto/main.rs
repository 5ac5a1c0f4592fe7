use serde::Serialize;

use crate::domain::appointment::AppointmentDetails;
use crate::domain::dashboard::{MonthlyStats, ServicePopularity};
use crate::domain::types::Price;

/// Data required to render the dashboard template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    pub total_clients: usize,
    pub total_services: usize,
    pub total_appointments: usize,
    /// Sum of all booked price snapshots.
    pub revenue: Price,
    /// Next appointments starting from now.
    pub upcoming: Vec<AppointmentDetails>,
    pub popular_services: Vec<ServicePopularity>,
    pub year: i32,
    /// Twelve entries, January first.
    pub monthly: Vec<MonthlyStats>,
}
