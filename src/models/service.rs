//! Diesel models for catalog services.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::{
    NewService as DomainNewService, Service as DomainService,
    UpdateService as DomainUpdateService,
};
use crate::domain::types::{
    DurationMinutes, OwnerId, Price, ServiceId, ServiceName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::service::Service`].
pub struct Service {
    pub id: i32,
    pub name: String,
    /// Price in cents.
    pub price: i64,
    pub duration: i32,
    pub created_at: NaiveDateTime,
    pub created_by: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService<'a> {
    pub name: &'a str,
    pub price: i64,
    pub duration: i32,
    pub created_by: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::services)]
pub struct UpdateService<'a> {
    pub name: &'a str,
    pub price: i64,
    pub duration: i32,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServiceId::try_from(service.id)?,
            name: ServiceName::new(service.name)?,
            price: Price::from_cents(service.price)?,
            duration: DurationMinutes::try_from(service.duration)?,
            created_at: service.created_at,
            created_by: service
                .created_by
                .filter(|owner| !owner.trim().is_empty())
                .map(OwnerId::new)
                .transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewService> for NewService<'a> {
    fn from(service: &'a DomainNewService) -> Self {
        Self {
            name: service.name.as_str(),
            price: service.price.cents(),
            duration: service.duration.get(),
            created_by: service.created_by.as_ref().map(|o| o.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateService> for UpdateService<'a> {
    fn from(service: &'a DomainUpdateService) -> Self {
        Self {
            name: service.name.as_str(),
            price: service.price.cents(),
            duration: service.duration.get(),
        }
    }
}
