//! Appointment listing and the booking flow.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::appointment::{Appointment, Booking, BookingError};
use crate::domain::search;
use crate::dto::SearchQuery;
use crate::dto::appointments::AppointmentsPageData;
use crate::forms::appointment::{SaveAppointmentForm, SaveAppointmentPayload};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, ClientReader, ServiceReader,
};
use crate::services::{ServiceError, ServiceResult, owner_of};

fn booking_error(err: BookingError) -> ServiceError {
    let message = match err {
        BookingError::NoServices => "Выберите хотя бы одну услугу".to_string(),
        BookingError::UnknownService(id) => format!("Услуга {id} не найдена"),
        BookingError::EndTimeOutOfRange => "Некорректное время окончания записи".to_string(),
    };
    ServiceError::Form(message)
}

/// Loads appointments with the clients and services the booking dialog offers.
pub fn load_appointments_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SearchQuery,
) -> ServiceResult<AppointmentsPageData>
where
    R: AppointmentReader + ClientReader + ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let appointments = repo
        .list_appointments(AppointmentListQuery::new())
        .map_err(|err| {
            log::error!("Failed to list appointments: {err}");
            ServiceError::from(err)
        })?;
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;
    let services = repo.list_services().map_err(|err| {
        log::error!("Failed to list services: {err}");
        ServiceError::from(err)
    })?;

    let search_query = query.term();
    let appointments = search::filter(appointments, search_query.as_deref().unwrap_or_default());

    Ok(AppointmentsPageData {
        appointments,
        clients,
        services,
        search_query,
    })
}

/// Books a new appointment or rebooks an existing one.
///
/// The end time is derived from the selected services and their current
/// prices are snapshotted. Nothing is written unless the whole selection is
/// valid; the appointment and its services are saved atomically.
pub fn save_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveAppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + ClientReader + ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = SaveAppointmentPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate appointment form: {err}");
        ServiceError::from(err)
    })?;

    if let Some(id) = payload.id {
        if repo.get_appointment_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound);
        }
    }

    if repo.get_client_by_id(payload.client_id)?.is_none() {
        log::error!("Booking references unknown client {}", payload.client_id);
        return Err(ServiceError::Form("Клиент не найден".to_string()));
    }

    let catalog = repo.list_services()?;
    let booking = Booking::new(
        payload.client_id,
        payload.start_time,
        &payload.service_ids,
        &catalog,
    )
    .map_err(|err| {
        log::error!("Failed to compute booking: {err}");
        booking_error(err)
    })?
    .status(payload.status)
    .notes(payload.notes)
    .created_by(owner_of(user));

    repo.save_booking(payload.id, &booking).map_err(|err| {
        log::error!("Failed to save appointment: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::appointment::{AppointmentDetails, AppointmentLine};
    use crate::domain::client::Client;
    use crate::domain::service::Service;
    use crate::domain::types::{AppointmentId, AppointmentStatus, ClientId, ServiceId};
    use crate::repository::errors::RepositoryResult;
    use crate::services::test_support::{at, client, outsider, service, staff};

    #[derive(Default)]
    struct FakeRepo {
        clients: Vec<Client>,
        services: Vec<Service>,
        saved: RefCell<Vec<(Option<AppointmentId>, Booking)>>,
        existing: Vec<AppointmentDetails>,
    }

    impl ClientReader for FakeRepo {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
            Ok(self.clients.iter().find(|c| c.id == id).cloned())
        }

        fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
            Ok(self.clients.clone())
        }

        fn count_clients(&self) -> RepositoryResult<usize> {
            Ok(self.clients.len())
        }
    }

    impl ServiceReader for FakeRepo {
        fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
            Ok(self.services.iter().find(|s| s.id == id).cloned())
        }

        fn list_services(&self) -> RepositoryResult<Vec<Service>> {
            Ok(self.services.clone())
        }

        fn count_services(&self) -> RepositoryResult<usize> {
            Ok(self.services.len())
        }
    }

    impl AppointmentReader for FakeRepo {
        fn get_appointment_by_id(
            &self,
            id: AppointmentId,
        ) -> RepositoryResult<Option<AppointmentDetails>> {
            Ok(self
                .existing
                .iter()
                .find(|a| a.appointment.id == id)
                .cloned())
        }

        fn list_appointments(
            &self,
            _query: AppointmentListQuery,
        ) -> RepositoryResult<Vec<AppointmentDetails>> {
            Ok(self.existing.clone())
        }

        fn count_appointments(&self) -> RepositoryResult<usize> {
            Ok(self.existing.len())
        }

        fn list_booked_lines(&self) -> RepositoryResult<Vec<AppointmentLine>> {
            Ok(self
                .existing
                .iter()
                .flat_map(|a| a.services.clone())
                .collect())
        }
    }

    impl AppointmentWriter for FakeRepo {
        fn save_booking(
            &self,
            id: Option<AppointmentId>,
            booking: &Booking,
        ) -> RepositoryResult<Appointment> {
            self.saved.borrow_mut().push((id, booking.clone()));
            Ok(Appointment {
                id: id.unwrap_or(AppointmentId::new(1).unwrap()),
                client_id: booking.client_id,
                start_time: booking.start_time,
                end_time: booking.end_time,
                status: booking.status.clone(),
                notes: booking.notes.clone(),
                created_at: at(1, 9, 0),
                created_by: booking.created_by.clone(),
            })
        }
    }

    fn repo() -> FakeRepo {
        FakeRepo {
            clients: vec![client(1, "Ana", "111")],
            services: vec![
                service(1, "Corte", "50", 30),
                service(2, "Escova", "30", 45),
            ],
            ..Default::default()
        }
    }

    fn form(client_id: &str, service_ids: &[&str]) -> SaveAppointmentForm {
        SaveAppointmentForm {
            client_id: client_id.to_string(),
            service_ids: service_ids.iter().map(|s| s.to_string()).collect(),
            start_time: "2024-01-01T10:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn booking_derives_end_time_and_snapshots_prices() {
        let repo = repo();

        let saved = save_appointment(&repo, &staff(), form("1", &["1", "2"])).unwrap();

        assert_eq!(saved.end_time, at(1, 11, 15));
        assert_eq!(saved.status, AppointmentStatus::Scheduled);
        assert_eq!(saved.created_by.unwrap().as_str(), "staff-1");

        let stored = repo.saved.borrow();
        assert_eq!(stored.len(), 1);
        let (id, booking) = &stored[0];
        assert!(id.is_none());
        assert_eq!(booking.total_price().cents(), 8000);
    }

    #[test]
    fn empty_service_selection_performs_no_write() {
        let repo = repo();

        let result = save_appointment(&repo, &staff(), form("1", &[]));

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.saved.borrow().is_empty());
    }

    #[test]
    fn empty_client_selection_performs_no_write() {
        let repo = repo();

        let result = save_appointment(&repo, &staff(), form("", &["1"]));

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.saved.borrow().is_empty());
    }

    #[test]
    fn unknown_client_or_service_is_rejected() {
        let repo = repo();

        let unknown_client = save_appointment(&repo, &staff(), form("7", &["1"]));
        let unknown_service = save_appointment(&repo, &staff(), form("1", &["1", "9"]));

        assert!(matches!(unknown_client, Err(ServiceError::Form(_))));
        assert!(matches!(unknown_service, Err(ServiceError::Form(_))));
        assert!(repo.saved.borrow().is_empty());
    }

    #[test]
    fn editing_missing_appointment_is_not_found() {
        let repo = repo();
        let form = SaveAppointmentForm {
            id: Some("5".to_string()),
            ..form("1", &["1"])
        };

        let result = save_appointment(&repo, &staff(), form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert!(repo.saved.borrow().is_empty());
    }

    #[test]
    fn booking_requires_role() {
        let repo = repo();

        let result = save_appointment(&repo, &outsider(), form("1", &["1"]));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn appointments_page_filters_by_service_name() {
        let mut repo = repo();
        let ana = client(1, "Ana", "111");
        let bia = client(2, "Bia", "222");
        let details = |id: i32, client: Client, name: &str| {
            let appointment_id = AppointmentId::new(id).unwrap();
            AppointmentDetails {
                appointment: Appointment {
                    id: appointment_id,
                    client_id: client.id,
                    start_time: at(2, 10, 0),
                    end_time: at(2, 10, 30),
                    status: AppointmentStatus::Scheduled,
                    notes: None,
                    created_at: at(1, 9, 0),
                    created_by: None,
                },
                client,
                services: vec![AppointmentLine {
                    appointment_id,
                    service_id: ServiceId::new(1).unwrap(),
                    name: crate::domain::types::ServiceName::new(name).unwrap(),
                    price: crate::domain::types::Price::parse("10").unwrap(),
                }],
            }
        };
        repo.existing = vec![details(1, ana, "Corte"), details(2, bia, "Escova")];

        let page = load_appointments_page(&repo, &staff(), SearchQuery::new("esc")).unwrap();

        assert_eq!(page.appointments.len(), 1);
        assert_eq!(page.appointments[0].client.name.as_str(), "Bia");
        assert_eq!(page.clients.len(), 1);
        assert_eq!(page.services.len(), 2);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::staff;

    #[test]
    fn invalid_selection_touches_no_repository() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().times(0);
        repo.expect_list_services().times(0);
        repo.expect_save_booking().times(0);

        let result = save_appointment(
            &repo,
            &staff(),
            SaveAppointmentForm {
                client_id: "1".to_string(),
                start_time: "2024-01-01T10:00".to_string(),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
