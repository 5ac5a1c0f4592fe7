//! Form definitions backing the salon routes.
//!
//! Each form is deserialised from the request, checked with `validator`, and
//! converted into a typed payload through `TryFrom`.

use thiserror::Error;
use validator::ValidationErrors;

pub mod appointment;
pub mod client;
pub mod service;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid service id")]
    InvalidServiceId,

    #[error("invalid appointment id")]
    InvalidAppointmentId,

    #[error("price must be a non-negative amount with at most two decimals")]
    InvalidPrice,

    #[error("duration must be a positive number of minutes")]
    InvalidDuration,

    #[error("client is required")]
    MissingClient,

    #[error("at least one service is required")]
    NoServices,

    #[error("invalid start time")]
    InvalidStartTime,
}

impl FormError {
    /// Message shown to the user in a flash message or an API error body.
    pub fn user_message(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "Ошибка валидации формы",
            FormError::InvalidName => "Укажите название",
            FormError::InvalidPhoneNumber => "Некорректный номер телефона",
            FormError::InvalidClientId => "Некорректный клиент",
            FormError::InvalidServiceId => "Некорректная услуга",
            FormError::InvalidAppointmentId => "Некорректная запись",
            FormError::InvalidPrice => "Цена должна быть неотрицательным числом",
            FormError::InvalidDuration => "Длительность должна быть положительным числом минут",
            FormError::MissingClient => "Выберите клиента",
            FormError::NoServices => "Выберите хотя бы одну услугу",
            FormError::InvalidStartTime => "Укажите дату и время начала",
        }
    }
}

/// Returns `None` for blank input, the trimmed value otherwise.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
