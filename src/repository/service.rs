use diesel::prelude::*;

use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::ServiceId;
use crate::models::service::{
    NewService as DbNewService, Service as DbService, UpdateService as DbUpdateService,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ServiceReader, ServiceWriter};
use crate::schema::services;

fn into_domain(service: DbService) -> RepositoryResult<Service> {
    Service::try_from(service).map_err(RepositoryError::from)
}

impl ServiceReader for DieselRepository {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        let mut conn = self.conn()?;

        services::table
            .find(id.get())
            .select(DbService::as_select())
            .first::<DbService>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_services(&self) -> RepositoryResult<Vec<Service>> {
        let mut conn = self.conn()?;

        services::table
            .order((services::name.asc(), services::id.asc()))
            .select(DbService::as_select())
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    fn count_services(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total: i64 = services::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service> {
        let mut conn = self.conn()?;

        let insertable = DbNewService::from(new_service);
        let created = diesel::insert_into(services::table)
            .values(&insertable)
            .returning(DbService::as_returning())
            .get_result::<DbService>(&mut conn)?;

        into_domain(created)
    }

    fn update_service(&self, id: ServiceId, updates: &UpdateService) -> RepositoryResult<Service> {
        let mut conn = self.conn()?;

        // Booked price snapshots live in appointment_services and stay untouched.
        let changeset = DbUpdateService::from(updates);
        let updated = diesel::update(services::table.find(id.get()))
            .set(&changeset)
            .returning(DbService::as_returning())
            .get_result::<DbService>(&mut conn)?;

        into_domain(updated)
    }
}
