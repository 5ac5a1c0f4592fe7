//! Lookups feeding the booking dialog pickers.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::client::Client;
use crate::domain::search;
use crate::domain::service::Service;
use crate::dto::SearchQuery;
use crate::repository::{ClientReader, ServiceReader};
use crate::services::{ServiceError, ServiceResult};

/// Returns all clients matching the optional search term.
pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SearchQuery,
) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;

    Ok(search::filter(clients, query.term().as_deref().unwrap_or_default()))
}

/// Returns all services matching the optional search term.
pub fn list_services<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SearchQuery,
) -> ServiceResult<Vec<Service>>
where
    R: ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let services = repo.list_services().map_err(|err| {
        log::error!("Failed to list services: {err}");
        ServiceError::from(err)
    })?;

    Ok(search::filter(services, query.term().as_deref().unwrap_or_default()))
}
