//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::appointment::{Appointment, AppointmentDetails, AppointmentLine, Booking};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{AppointmentId, ClientId, ServiceId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, ClientReader, ClientWriter,
    ServiceReader, ServiceWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn count_clients(&self) -> RepositoryResult<usize>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    }

    impl ServiceReader for Repository {
        fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
        fn list_services(&self) -> RepositoryResult<Vec<Service>>;
        fn count_services(&self) -> RepositoryResult<usize>;
    }

    impl ServiceWriter for Repository {
        fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
        fn update_service(
            &self,
            id: ServiceId,
            updates: &UpdateService,
        ) -> RepositoryResult<Service>;
    }

    impl AppointmentReader for Repository {
        fn get_appointment_by_id(
            &self,
            id: AppointmentId,
        ) -> RepositoryResult<Option<AppointmentDetails>>;
        fn list_appointments(
            &self,
            query: AppointmentListQuery,
        ) -> RepositoryResult<Vec<AppointmentDetails>>;
        fn count_appointments(&self) -> RepositoryResult<usize>;
        fn list_booked_lines(&self) -> RepositoryResult<Vec<AppointmentLine>>;
    }

    impl AppointmentWriter for Repository {
        fn save_booking(
            &self,
            id: Option<AppointmentId>,
            booking: &Booking,
        ) -> RepositoryResult<Appointment>;
    }
}
