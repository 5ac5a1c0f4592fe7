//! Catalog services offered by the salon.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DurationMinutes, OwnerId, Price, ServiceId, ServiceName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: ServiceName,
    /// Current list price; bookings keep their own snapshot.
    pub price: Price,
    pub duration: DurationMinutes,
    pub created_at: NaiveDateTime,
    pub created_by: Option<OwnerId>,
}

#[derive(Clone, Debug)]
pub struct NewService {
    pub name: ServiceName,
    pub price: Price,
    pub duration: DurationMinutes,
    pub created_by: Option<OwnerId>,
}

impl NewService {
    #[must_use]
    pub fn new(
        name: ServiceName,
        price: Price,
        duration: DurationMinutes,
        created_by: Option<OwnerId>,
    ) -> Self {
        Self {
            name,
            price,
            duration,
            created_by,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateService {
    pub name: ServiceName,
    pub price: Price,
    pub duration: DurationMinutes,
}

impl UpdateService {
    #[must_use]
    pub fn new(name: ServiceName, price: Price, duration: DurationMinutes) -> Self {
        Self {
            name,
            price,
            duration,
        }
    }
}
