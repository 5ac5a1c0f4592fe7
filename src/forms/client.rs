use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ClientId, ClientName, OwnerId, PhoneNumber};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Form data for registering a client, from the clients page or the booking dialog.
pub struct AddClientForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Free-text phone; blank means none.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for editing an existing client.
pub struct SaveClientForm {
    pub id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub phone: Option<String>,
}

#[derive(Debug)]
pub struct AddClientPayload {
    pub name: ClientName,
    pub phone: Option<PhoneNumber>,
}

#[derive(Debug)]
pub struct SaveClientPayload {
    pub id: ClientId,
    pub updates: UpdateClient,
}

fn parse_name(name: String) -> Result<ClientName, FormError> {
    ClientName::new(name).map_err(|_| FormError::InvalidName)
}

fn parse_phone(phone: Option<&str>) -> Result<Option<PhoneNumber>, FormError> {
    non_blank(phone)
        .map(|p| PhoneNumber::new(p).map_err(|_| FormError::InvalidPhoneNumber))
        .transpose()
}

impl TryFrom<AddClientForm> for AddClientPayload {
    type Error = FormError;

    fn try_from(form: AddClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            phone: parse_phone(form.phone.as_deref())?,
            name: parse_name(form.name)?,
        })
    }
}

impl AddClientPayload {
    pub fn into_domain(self, created_by: Option<OwnerId>) -> NewClient {
        NewClient::new(self.name, self.phone, created_by)
    }
}

impl TryFrom<SaveClientForm> for SaveClientPayload {
    type Error = FormError;

    fn try_from(form: SaveClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = ClientId::new(form.id).map_err(|_| FormError::InvalidClientId)?;
        let phone = parse_phone(form.phone.as_deref())?;

        Ok(Self {
            id,
            updates: UpdateClient::new(parse_name(form.name)?, phone),
        })
    }
}
