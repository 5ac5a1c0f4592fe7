use chrono::{Datelike, NaiveDate, NaiveDateTime};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::dashboard::{monthly_breakdown, rank_services, total_revenue};
use crate::dto::main::IndexPageData;
use crate::repository::errors::RepositoryError;
use crate::repository::{AppointmentListQuery, AppointmentReader, ClientReader, ServiceReader};
use crate::services::{ServiceError, ServiceResult};

/// Number of upcoming appointments shown on the dashboard.
pub const UPCOMING_LIMIT: usize = 5;
/// Number of services in the popularity ranking.
pub const POPULAR_LIMIT: usize = 5;

fn year_start(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Aggregates the dashboard as seen at `now`.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    now: NaiveDateTime,
) -> ServiceResult<IndexPageData>
where
    R: AppointmentReader + ClientReader + ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let log_err = |err: RepositoryError| {
        log::error!("Failed to load dashboard: {err}");
        ServiceError::from(err)
    };

    let total_clients = repo.count_clients().map_err(log_err)?;
    let total_services = repo.count_services().map_err(log_err)?;
    let total_appointments = repo.count_appointments().map_err(log_err)?;

    let lines = repo.list_booked_lines().map_err(log_err)?;
    let revenue = total_revenue(&lines);
    let popular_services = rank_services(&lines, POPULAR_LIMIT);

    let upcoming = repo
        .list_appointments(AppointmentListQuery::new().from(now).limit(UPCOMING_LIMIT))
        .map_err(log_err)?;

    let year = now.year();
    let mut year_query = AppointmentListQuery::new();
    if let Some(start) = year_start(year) {
        year_query = year_query.from(start);
    }
    if let Some(end) = year_start(year + 1) {
        year_query = year_query.until(end);
    }
    let this_year = repo.list_appointments(year_query).map_err(log_err)?;
    let monthly = monthly_breakdown(year, &this_year);

    Ok(IndexPageData {
        total_clients,
        total_services,
        total_appointments,
        revenue,
        upcoming,
        popular_services,
        year,
        monthly,
    })
}
