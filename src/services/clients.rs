use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::client::Client;
use crate::domain::search;
use crate::dto::SearchQuery;
use crate::dto::clients::ClientsPageData;
use crate::forms::client::{AddClientForm, AddClientPayload, SaveClientForm, SaveClientPayload};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult, owner_of};

/// Loads every client and narrows the list by the search query.
pub fn load_clients_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SearchQuery,
) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;

    let search_query = query.term();
    let clients = search::filter(clients, search_query.as_deref().unwrap_or_default());

    Ok(ClientsPageData {
        clients,
        search_query,
    })
}

/// Validates the form and registers a client owned by `user`.
pub fn add_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = AddClientPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_client(&payload.into_domain(owner_of(user)))
        .map_err(|err| {
            log::error!("Failed to add a client: {err}");
            ServiceError::from(err)
        })
}

/// Updates name and phone of an existing client.
pub fn save_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveClientForm,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = SaveClientPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })?;

    if repo.get_client_by_id(payload.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.update_client(payload.id, &payload.updates)
        .map_err(|err| {
            log::error!("Failed to update client {}: {err}", payload.id);
            ServiceError::from(err)
        })
}
