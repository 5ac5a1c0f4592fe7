//! Service catalog management.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::search;
use crate::domain::service::Service;
use crate::dto::SearchQuery;
use crate::dto::catalog::ServicesPageData;
use crate::forms::service::{
    AddServiceForm, AddServicePayload, SaveServiceForm, SaveServicePayload,
};
use crate::repository::{ServiceReader, ServiceWriter};
use crate::services::{ServiceError, ServiceResult, owner_of};

pub fn load_services_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SearchQuery,
) -> ServiceResult<ServicesPageData>
where
    R: ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let services = repo.list_services().map_err(|err| {
        log::error!("Failed to list services: {err}");
        ServiceError::from(err)
    })?;

    let search_query = query.term();
    let services = search::filter(services, search_query.as_deref().unwrap_or_default());

    Ok(ServicesPageData {
        services,
        search_query,
    })
}

pub fn add_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = AddServicePayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate service form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_service(&payload.into_domain(owner_of(user)))
        .map_err(|err| {
            log::error!("Failed to add a service: {err}");
            ServiceError::from(err)
        })
}

/// Updates a catalog entry. Prices already booked keep their snapshot.
pub fn save_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceReader + ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = SaveServicePayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate service form: {err}");
        ServiceError::from(err)
    })?;

    if repo.get_service_by_id(payload.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.update_service(payload.id, &payload.updates)
        .map_err(|err| {
            log::error!("Failed to update service {}: {err}", payload.id);
            ServiceError::from(err)
        })
}
