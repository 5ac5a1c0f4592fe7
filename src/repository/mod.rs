//! Persistence boundary.
//!
//! Services depend on the reader/writer traits declared here; the only
//! production implementation is [`DieselRepository`], which talks to SQLite
//! through a pooled Diesel connection.

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::appointment::{Appointment, AppointmentDetails, AppointmentLine, Booking};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{AppointmentId, ClientId, ServiceId};
use crate::repository::errors::RepositoryResult;

pub mod appointment;
pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod service;

/// Diesel-backed repository shared by all request handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Time window and size limit applied when listing appointments.
///
/// Both bounds apply to the start time: `from` is inclusive, `until`
/// exclusive. Results are always ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentListQuery {
    pub from: Option<NaiveDateTime>,
    pub until: Option<NaiveDateTime>,
    pub limit: Option<usize>,
}

impl AppointmentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: NaiveDateTime) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// All clients ordered by name.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn count_clients(&self) -> RepositoryResult<usize>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
}

pub trait ServiceReader {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    /// The whole catalog ordered by name.
    fn list_services(&self) -> RepositoryResult<Vec<Service>>;
    fn count_services(&self) -> RepositoryResult<usize>;
}

pub trait ServiceWriter {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
    fn update_service(&self, id: ServiceId, updates: &UpdateService) -> RepositoryResult<Service>;
}

pub trait AppointmentReader {
    fn get_appointment_by_id(&self, id: AppointmentId)
    -> RepositoryResult<Option<AppointmentDetails>>;
    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Vec<AppointmentDetails>>;
    fn count_appointments(&self) -> RepositoryResult<usize>;
    /// Every booked service of every appointment with its catalog name.
    fn list_booked_lines(&self) -> RepositoryResult<Vec<AppointmentLine>>;
}

pub trait AppointmentWriter {
    /// Inserts a new appointment (`id` is `None`) or updates an existing one,
    /// then replaces its booked services with the ones in `booking`.
    ///
    /// Runs in a single transaction: on failure nothing is persisted.
    fn save_booking(
        &self,
        id: Option<AppointmentId>,
        booking: &Booking,
    ) -> RepositoryResult<Appointment>;
}
