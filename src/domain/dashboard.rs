//! Aggregates shown on the dashboard.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use crate::domain::appointment::{AppointmentDetails, AppointmentLine};
use crate::domain::types::Price;

/// Number of bookings of a single service name.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ServicePopularity {
    pub name: String,
    pub bookings: usize,
}

/// Appointments and revenue of one calendar month.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyStats {
    /// Month number, 1 to 12.
    pub month: u32,
    pub appointments: usize,
    pub revenue: Price,
}

/// Sum of all booked price snapshots.
pub fn total_revenue(lines: &[AppointmentLine]) -> Price {
    lines.iter().map(|line| line.price).sum()
}

/// Counts bookings per service name, most booked first; ties are ordered by name.
pub fn rank_services(lines: &[AppointmentLine], limit: usize) -> Vec<ServicePopularity> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        *counts.entry(line.name.as_str()).or_default() += 1;
    }

    let mut ranked = counts
        .into_iter()
        .map(|(name, bookings)| ServicePopularity {
            name: name.to_string(),
            bookings,
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.bookings.cmp(&a.bookings).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

/// Builds twelve monthly entries for `year` from appointments by start time.
pub fn monthly_breakdown(year: i32, appointments: &[AppointmentDetails]) -> Vec<MonthlyStats> {
    let mut months = (1..=12)
        .map(|month| MonthlyStats {
            month,
            appointments: 0,
            revenue: Price::ZERO,
        })
        .collect::<Vec<_>>();

    for details in appointments {
        let start = details.appointment.start_time;
        if start.year() != year {
            continue;
        }
        if let Some(entry) = months.get_mut(start.month0() as usize) {
            entry.appointments += 1;
            entry.revenue = entry.revenue + details.total_price();
        }
    }

    months
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::appointment::Appointment;
    use crate::domain::client::Client;
    use crate::domain::types::{
        AppointmentId, AppointmentStatus, ClientId, ClientName, ServiceId, ServiceName,
    };

    fn line(appointment_id: i32, service_id: i32, name: &str, price: &str) -> AppointmentLine {
        AppointmentLine {
            appointment_id: AppointmentId::new(appointment_id).unwrap(),
            service_id: ServiceId::new(service_id).unwrap(),
            name: ServiceName::new(name).unwrap(),
            price: Price::parse(price).unwrap(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn details(id: i32, start: NaiveDateTime, lines: Vec<AppointmentLine>) -> AppointmentDetails {
        let client = Client {
            id: ClientId::new(1).unwrap(),
            name: ClientName::new("Ana").unwrap(),
            phone: None,
            created_at: start,
            created_by: None,
        };
        AppointmentDetails {
            appointment: Appointment {
                id: AppointmentId::new(id).unwrap(),
                client_id: client.id,
                start_time: start,
                end_time: start,
                status: AppointmentStatus::Scheduled,
                notes: None,
                created_at: start,
                created_by: None,
            },
            client,
            services: lines,
        }
    }

    #[test]
    fn revenue_sums_price_snapshots() {
        let lines = vec![
            line(1, 1, "Corte", "50"),
            line(1, 2, "Escova", "30.25"),
            line(2, 1, "Corte", "45.50"),
        ];

        assert_eq!(total_revenue(&lines).to_string(), "125.75");
        assert_eq!(total_revenue(&[]), Price::ZERO);
    }

    #[test]
    fn services_are_ranked_by_bookings_then_name() {
        let lines = vec![
            line(1, 2, "Escova", "30"),
            line(1, 1, "Corte", "50"),
            line(2, 1, "Corte", "50"),
            line(3, 3, "Barba", "20"),
        ];

        let ranked = rank_services(&lines, 2);

        assert_eq!(
            ranked,
            vec![
                ServicePopularity {
                    name: "Corte".to_string(),
                    bookings: 2
                },
                ServicePopularity {
                    name: "Barba".to_string(),
                    bookings: 1
                },
            ]
        );
    }

    #[test]
    fn monthly_breakdown_counts_only_requested_year() {
        let appointments = vec![
            details(1, date(2024, 1, 5), vec![line(1, 1, "Corte", "50")]),
            details(2, date(2024, 1, 20), vec![line(2, 1, "Corte", "40")]),
            details(3, date(2024, 3, 2), vec![]),
            details(4, date(2023, 1, 2), vec![line(4, 1, "Corte", "99")]),
        ];

        let months = monthly_breakdown(2024, &appointments);

        assert_eq!(months.len(), 12);
        assert_eq!(months[0].appointments, 2);
        assert_eq!(months[0].revenue.to_string(), "90.00");
        assert_eq!(months[2].appointments, 1);
        assert_eq!(months[2].revenue, Price::ZERO);
        assert_eq!(months[11].appointments, 0);
    }
}
