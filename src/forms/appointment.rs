use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{AppointmentId, AppointmentNotes, AppointmentStatus, ClientId, ServiceId};
use crate::forms::{FormError, non_blank};

/// Layouts accepted for the start time; the first is what `datetime-local` sends.
const START_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Default, Deserialize, Validate)]
/// Booking dialog submission.
///
/// Decoded with `serde_html_form` so repeated `service_ids` keys collect into
/// a vector. Every field is text so that missing selections surface as form
/// errors.
pub struct SaveAppointmentForm {
    /// Present when editing an existing appointment.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: String,
}

/// Validated booking request.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveAppointmentPayload {
    pub id: Option<AppointmentId>,
    pub client_id: ClientId,
    /// Selected services without duplicates, in selection order.
    pub service_ids: Vec<ServiceId>,
    pub start_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<AppointmentNotes>,
}

pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

impl TryFrom<SaveAppointmentForm> for SaveAppointmentPayload {
    type Error = FormError;

    fn try_from(form: SaveAppointmentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = non_blank(form.id.as_deref())
            .map(|raw| {
                parse_id(raw)
                    .and_then(|id| AppointmentId::new(id).ok())
                    .ok_or(FormError::InvalidAppointmentId)
            })
            .transpose()?;

        let client_id = non_blank(Some(&form.client_id)).ok_or(FormError::MissingClient)?;
        let client_id = parse_id(client_id)
            .and_then(|id| ClientId::new(id).ok())
            .ok_or(FormError::InvalidClientId)?;

        let mut service_ids: Vec<ServiceId> = Vec::with_capacity(form.service_ids.len());
        for raw in form.service_ids.iter().filter_map(|s| non_blank(Some(s))) {
            let id = parse_id(raw)
                .and_then(|id| ServiceId::new(id).ok())
                .ok_or(FormError::InvalidServiceId)?;
            if !service_ids.contains(&id) {
                service_ids.push(id);
            }
        }
        if service_ids.is_empty() {
            return Err(FormError::NoServices);
        }

        let start_time = parse_start_time(&form.start_time).ok_or(FormError::InvalidStartTime)?;

        // Notes that sanitise down to nothing are dropped.
        let notes = non_blank(Some(&form.notes)).and_then(|n| AppointmentNotes::new(n).ok());

        Ok(Self {
            id,
            client_id,
            service_ids,
            start_time,
            status: AppointmentStatus::from(form.status.as_str()),
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn form() -> SaveAppointmentForm {
        SaveAppointmentForm {
            client_id: "3".to_string(),
            service_ids: vec!["2".to_string(), "1".to_string()],
            start_time: "2024-01-01T10:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn urlencoded_body_with_repeated_services_is_parsed() {
        let body = "id=&client_id=3&service_ids=2&service_ids=1&service_ids=2\
                    &start_time=2024-01-01T10%3A00&status=completed&notes=hi";
        let form: SaveAppointmentForm = serde_html_form::from_str(body).unwrap();

        let payload = SaveAppointmentPayload::try_from(form).unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.client_id.get(), 3);
        assert_eq!(
            payload.service_ids,
            vec![ServiceId::new(2).unwrap(), ServiceId::new(1).unwrap()]
        );
        assert_eq!(
            payload.start_time,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(payload.status, AppointmentStatus::Completed);
        assert_eq!(payload.notes.unwrap().as_str(), "hi");
    }

    #[test]
    fn empty_client_is_rejected() {
        let form = SaveAppointmentForm {
            client_id: String::new(),
            ..form()
        };

        assert!(matches!(
            SaveAppointmentPayload::try_from(form),
            Err(FormError::MissingClient)
        ));
    }

    #[test]
    fn empty_service_selection_is_rejected() {
        let form = SaveAppointmentForm {
            service_ids: vec![String::new()],
            ..form()
        };

        assert!(matches!(
            SaveAppointmentPayload::try_from(form),
            Err(FormError::NoServices)
        ));
    }

    #[test]
    fn missing_or_malformed_start_time_is_rejected() {
        for start_time in ["", "yesterday", "2024-13-01T10:00"] {
            let form = SaveAppointmentForm {
                start_time: start_time.to_string(),
                ..form()
            };
            assert!(matches!(
                SaveAppointmentPayload::try_from(form),
                Err(FormError::InvalidStartTime)
            ));
        }
    }

    #[test]
    fn edit_id_is_parsed() {
        let form = SaveAppointmentForm {
            id: Some("12".to_string()),
            ..form()
        };

        let payload = SaveAppointmentPayload::try_from(form).unwrap();

        assert_eq!(payload.id, Some(AppointmentId::new(12).unwrap()));
        assert_eq!(payload.status, AppointmentStatus::Scheduled);
        assert!(payload.notes.is_none());
    }

    #[test]
    fn start_time_accepts_seconds_and_space_separator() {
        assert!(parse_start_time("2024-01-01T10:00:30").is_some());
        assert!(parse_start_time("2024-01-01 10:00").is_some());
    }
}
