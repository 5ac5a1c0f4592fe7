use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{ClientId, ClientName, OwnerId, PhoneNumber, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub created_by: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::try_from(client.id)?,
            name: ClientName::new(client.name)?,
            phone: client
                .phone
                .filter(|phone| !phone.trim().is_empty())
                .map(PhoneNumber::new)
                .transpose()?,
            created_at: client.created_at,
            created_by: client
                .created_by
                .filter(|owner| !owner.trim().is_empty())
                .map(OwnerId::new)
                .transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            phone: client.phone.as_ref().map(|p| p.as_str()),
            created_by: client.created_by.as_ref().map(|o| o.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(client: &'a DomainUpdateClient) -> Self {
        Self {
            name: client.name.as_str(),
            phone: client.phone.as_ref().map(|p| p.as_str()),
        }
    }
}
