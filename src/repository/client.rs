use diesel::prelude::*;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::clients;

fn into_domain(client: DbClient) -> RepositoryResult<Client> {
    Client::try_from(client).map_err(RepositoryError::from)
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;

        clients::table
            .find(id.get())
            .select(DbClient::as_select())
            .first::<DbClient>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;

        clients::table
            .order((clients::name.asc(), clients::id.asc()))
            .select(DbClient::as_select())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total: i64 = clients::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let insertable = DbNewClient::from(new_client);
        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .returning(DbClient::as_returning())
            .get_result::<DbClient>(&mut conn)?;

        into_domain(created)
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let changeset = DbUpdateClient::from(updates);
        let updated = diesel::update(clients::table.find(id.get()))
            .set(&changeset)
            .returning(DbClient::as_returning())
            .get_result::<DbClient>(&mut conn)?;

        into_domain(updated)
    }
}
