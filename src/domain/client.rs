use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, OwnerId, PhoneNumber};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub phone: Option<PhoneNumber>,
    pub created_at: NaiveDateTime,
    /// Staff member who registered the client.
    pub created_by: Option<OwnerId>,
}

#[derive(Clone, Debug)]
pub struct NewClient {
    pub name: ClientName,
    pub phone: Option<PhoneNumber>,
    pub created_by: Option<OwnerId>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName, phone: Option<PhoneNumber>, created_by: Option<OwnerId>) -> Self {
        Self {
            name,
            phone,
            created_by,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateClient {
    pub name: ClientName,
    pub phone: Option<PhoneNumber>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(name: ClientName, phone: Option<PhoneNumber>) -> Self {
        Self { name, phone }
    }
}
