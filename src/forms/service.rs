use serde::Deserialize;
use validator::Validate;

use crate::domain::service::{NewService, UpdateService};
use crate::domain::types::{DurationMinutes, OwnerId, Price, ServiceId, ServiceName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a catalog service.
///
/// Price and duration arrive as text so malformed numbers are reported as
/// validation errors instead of rejected by the extractor.
pub struct AddServiceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub price: String,
    #[validate(length(min = 1, max = 16))]
    pub duration: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveServiceForm {
    pub id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub price: String,
    #[validate(length(min = 1, max = 16))]
    pub duration: String,
}

#[derive(Debug)]
pub struct AddServicePayload {
    pub name: ServiceName,
    pub price: Price,
    pub duration: DurationMinutes,
}

#[derive(Debug)]
pub struct SaveServicePayload {
    pub id: ServiceId,
    pub updates: UpdateService,
}

fn parse_fields(
    name: String,
    price: &str,
    duration: &str,
) -> Result<(ServiceName, Price, DurationMinutes), FormError> {
    let name = ServiceName::new(name).map_err(|_| FormError::InvalidName)?;
    let price = Price::parse(price).map_err(|_| FormError::InvalidPrice)?;
    let duration = DurationMinutes::parse(duration).map_err(|_| FormError::InvalidDuration)?;
    Ok((name, price, duration))
}

impl TryFrom<AddServiceForm> for AddServicePayload {
    type Error = FormError;

    fn try_from(form: AddServiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let (name, price, duration) = parse_fields(form.name, &form.price, &form.duration)?;
        Ok(Self {
            name,
            price,
            duration,
        })
    }
}

impl AddServicePayload {
    pub fn into_domain(self, created_by: Option<OwnerId>) -> NewService {
        NewService::new(self.name, self.price, self.duration, created_by)
    }
}

impl TryFrom<SaveServiceForm> for SaveServicePayload {
    type Error = FormError;

    fn try_from(form: SaveServiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = ServiceId::new(form.id).map_err(|_| FormError::InvalidServiceId)?;
        let (name, price, duration) = parse_fields(form.name, &form.price, &form.duration)?;
        Ok(Self {
            id,
            updates: UpdateService::new(name, price, duration),
        })
    }
}
