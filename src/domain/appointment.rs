//! Appointments, their booked services, and the booking computation.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::client::Client;
use crate::domain::service::Service;
use crate::domain::types::{
    AppointmentId, AppointmentNotes, AppointmentServiceId, AppointmentStatus, ClientId,
    DurationMinutes, OwnerId, Price, ServiceId, ServiceName,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub start_time: NaiveDateTime,
    /// Start time plus the durations of all booked services.
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<AppointmentNotes>,
    pub created_at: NaiveDateTime,
    pub created_by: Option<OwnerId>,
}

/// Join row between an appointment and a service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppointmentService {
    pub id: AppointmentServiceId,
    pub appointment_id: AppointmentId,
    pub service_id: ServiceId,
    /// Price of the service at booking time.
    pub price: Price,
}

/// Booked service together with the catalog name, used for display.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppointmentLine {
    pub appointment_id: AppointmentId,
    pub service_id: ServiceId,
    pub name: ServiceName,
    pub price: Price,
}

/// Appointment with its client and booked services.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub client: Client,
    pub services: Vec<AppointmentLine>,
}

impl AppointmentDetails {
    /// Sum of the price snapshots of all booked services.
    pub fn total_price(&self) -> Price {
        self.services.iter().map(|line| line.price).sum()
    }

    pub fn service_ids(&self) -> Vec<ServiceId> {
        self.services.iter().map(|line| line.service_id).collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("at least one service must be selected")]
    NoServices,
    #[error("service {0} does not exist")]
    UnknownService(ServiceId),
    #[error("appointment end time is out of range")]
    EndTimeOutOfRange,
}

/// Service selected for a booking with the price captured from the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookedService {
    pub service_id: ServiceId,
    pub price: Price,
}

/// Validated appointment ready to be persisted together with its services.
#[derive(Clone, Debug, PartialEq)]
pub struct Booking {
    pub client_id: ClientId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<AppointmentNotes>,
    pub created_by: Option<OwnerId>,
    pub services: Vec<BookedService>,
}

/// Adds the total of `durations` to `start`.
///
/// Returns `None` when the result does not fit into `NaiveDateTime`.
pub fn compute_end_time<I>(start: NaiveDateTime, durations: I) -> Option<NaiveDateTime>
where
    I: IntoIterator<Item = DurationMinutes>,
{
    let total_minutes = durations
        .into_iter()
        .try_fold(0i64, |total, duration| {
            total.checked_add(i64::from(duration.get()))
        })?;
    TimeDelta::try_minutes(total_minutes).and_then(|delta| start.checked_add_signed(delta))
}

impl Booking {
    /// Resolves `service_ids` against the loaded catalog, snapshots prices and
    /// derives the end time.
    ///
    /// Every identifier must exist in `catalog`; an unknown service fails the
    /// booking instead of contributing a zero duration.
    pub fn new(
        client_id: ClientId,
        start_time: NaiveDateTime,
        service_ids: &[ServiceId],
        catalog: &[Service],
    ) -> Result<Self, BookingError> {
        if service_ids.is_empty() {
            return Err(BookingError::NoServices);
        }

        let selected = service_ids
            .iter()
            .map(|id| {
                catalog
                    .iter()
                    .find(|service| service.id == *id)
                    .ok_or(BookingError::UnknownService(*id))
            })
            .collect::<Result<Vec<&Service>, BookingError>>()?;

        let end_time = compute_end_time(start_time, selected.iter().map(|s| s.duration))
            .ok_or(BookingError::EndTimeOutOfRange)?;

        let services = selected
            .iter()
            .map(|service| BookedService {
                service_id: service.id,
                price: service.price,
            })
            .collect();

        Ok(Self {
            client_id,
            start_time,
            end_time,
            status: AppointmentStatus::default(),
            notes: None,
            created_by: None,
            services,
        })
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: Option<AppointmentNotes>) -> Self {
        self.notes = notes;
        self
    }

    pub fn created_by(mut self, owner: Option<OwnerId>) -> Self {
        self.created_by = owner;
        self
    }

    /// Total of the captured price snapshots.
    pub fn total_price(&self) -> Price {
        self.services.iter().map(|s| s.price).sum()
    }
}
