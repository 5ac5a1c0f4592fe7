//! Diesel models for appointments and their booked services.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment as DomainAppointment, AppointmentLine,
    AppointmentService as DomainAppointmentService, BookedService, Booking,
};
use crate::domain::types::{
    AppointmentId, AppointmentNotes, AppointmentServiceId, AppointmentStatus, ClientId, OwnerId,
    Price, ServiceId, ServiceName, TypeConstraintError,
};
use crate::models::client::Client;
use crate::models::service::Service;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::appointment::Appointment`].
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment<'a> {
    pub client_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub notes: Option<&'a str>,
    pub created_by: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(treat_none_as_null = true)]
/// Columns rewritten when an existing appointment is saved again.
pub struct UpdateAppointment<'a> {
    pub client_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::appointment_services)]
#[diesel(belongs_to(Appointment, foreign_key = appointment_id))]
#[diesel(belongs_to(Service, foreign_key = service_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Association table linking appointments to services with a price snapshot.
pub struct AppointmentService {
    pub id: i32,
    pub appointment_id: i32,
    pub service_id: i32,
    pub price: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointment_services)]
/// Insertable variant of [`AppointmentService`].
pub struct NewAppointmentService {
    pub appointment_id: i32,
    pub service_id: i32,
    pub price: i64,
}

impl TryFrom<Appointment> for DomainAppointment {
    type Error = TypeConstraintError;

    fn try_from(appointment: Appointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AppointmentId::try_from(appointment.id)?,
            client_id: ClientId::try_from(appointment.client_id)?,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            status: AppointmentStatus::from(appointment.status),
            notes: appointment
                .notes
                .filter(|notes| !notes.trim().is_empty())
                .map(AppointmentNotes::new)
                .transpose()?,
            created_at: appointment.created_at,
            created_by: appointment
                .created_by
                .filter(|owner| !owner.trim().is_empty())
                .map(OwnerId::new)
                .transpose()?,
        })
    }
}

impl TryFrom<AppointmentService> for DomainAppointmentService {
    type Error = TypeConstraintError;

    fn try_from(row: AppointmentService) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AppointmentServiceId::try_from(row.id)?,
            appointment_id: AppointmentId::try_from(row.appointment_id)?,
            service_id: ServiceId::try_from(row.service_id)?,
            price: Price::from_cents(row.price)?,
        })
    }
}

/// Booked service joined with the name of its catalog entry.
impl TryFrom<(AppointmentService, String)> for AppointmentLine {
    type Error = TypeConstraintError;

    fn try_from((row, name): (AppointmentService, String)) -> Result<Self, Self::Error> {
        Ok(Self {
            appointment_id: AppointmentId::try_from(row.appointment_id)?,
            service_id: ServiceId::try_from(row.service_id)?,
            name: ServiceName::new(name)?,
            price: Price::from_cents(row.price)?,
        })
    }
}

impl<'a> From<&'a Booking> for NewAppointment<'a> {
    fn from(booking: &'a Booking) -> Self {
        Self {
            client_id: booking.client_id.get(),
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: booking.status.to_string(),
            notes: booking.notes.as_ref().map(|n| n.as_str()),
            created_by: booking.created_by.as_ref().map(|o| o.as_str()),
        }
    }
}

impl<'a> From<&'a Booking> for UpdateAppointment<'a> {
    fn from(booking: &'a Booking) -> Self {
        Self {
            client_id: booking.client_id.get(),
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: booking.status.to_string(),
            notes: booking.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

impl NewAppointmentService {
    pub fn new(appointment_id: i32, booked: &BookedService) -> Self {
        Self {
            appointment_id,
            service_id: booked.service_id.get(),
            price: booked.price.cents(),
        }
    }
}
