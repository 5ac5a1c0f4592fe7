use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::appointment::{Appointment, AppointmentDetails, AppointmentLine, Booking};
use crate::domain::client::Client;
use crate::domain::types::AppointmentId;
use crate::models::appointment::{
    Appointment as DbAppointment, AppointmentService as DbAppointmentService, NewAppointment,
    NewAppointmentService, UpdateAppointment,
};
use crate::models::client::Client as DbClient;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
};
use crate::schema::{appointment_services, appointments, clients, services};

fn load_lines(
    conn: &mut SqliteConnection,
    appointment_ids: Option<&[i32]>,
) -> RepositoryResult<Vec<AppointmentLine>> {
    let mut query = appointment_services::table
        .inner_join(services::table)
        .select((DbAppointmentService::as_select(), services::name))
        .order(appointment_services::id.asc())
        .into_boxed();
    if let Some(ids) = appointment_ids {
        query = query.filter(appointment_services::appointment_id.eq_any(ids));
    }

    query
        .load::<(DbAppointmentService, String)>(conn)?
        .into_iter()
        .map(|row| AppointmentLine::try_from(row).map_err(RepositoryError::from))
        .collect()
}

/// Attaches clients and booked services to loaded appointment rows,
/// keeping the row order.
fn load_details(
    conn: &mut SqliteConnection,
    rows: Vec<DbAppointment>,
) -> RepositoryResult<Vec<AppointmentDetails>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let appointment_ids: Vec<i32> = rows.iter().map(|a| a.id).collect();
    let mut client_ids: Vec<i32> = rows.iter().map(|a| a.client_id).collect();
    client_ids.sort_unstable();
    client_ids.dedup();

    let clients = clients::table
        .filter(clients::id.eq_any(&client_ids))
        .select(DbClient::as_select())
        .load::<DbClient>(conn)?
        .into_iter()
        .map(|client| -> RepositoryResult<(i32, Client)> {
            Ok((client.id, Client::try_from(client)?))
        })
        .collect::<RepositoryResult<HashMap<i32, Client>>>()?;

    let mut lines: HashMap<i32, Vec<AppointmentLine>> = HashMap::new();
    for line in load_lines(conn, Some(&appointment_ids))? {
        lines
            .entry(line.appointment_id.get())
            .or_default()
            .push(line);
    }

    rows.into_iter()
        .map(|row| -> RepositoryResult<AppointmentDetails> {
            let client = clients.get(&row.client_id).cloned().ok_or_else(|| {
                RepositoryError::Unexpected(format!(
                    "appointment {} references missing client {}",
                    row.id, row.client_id
                ))
            })?;
            let services = lines.remove(&row.id).unwrap_or_default();
            Ok(AppointmentDetails {
                appointment: Appointment::try_from(row)?,
                client,
                services,
            })
        })
        .collect()
}

impl AppointmentReader for DieselRepository {
    fn get_appointment_by_id(
        &self,
        id: AppointmentId,
    ) -> RepositoryResult<Option<AppointmentDetails>> {
        let mut conn = self.conn()?;

        let row = appointments::table
            .find(id.get())
            .select(DbAppointment::as_select())
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(load_details(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Vec<AppointmentDetails>> {
        let mut conn = self.conn()?;

        let mut items = appointments::table
            .select(DbAppointment::as_select())
            .into_boxed();
        if let Some(from) = query.from {
            items = items.filter(appointments::start_time.ge(from));
        }
        if let Some(until) = query.until {
            items = items.filter(appointments::start_time.lt(until));
        }
        items = items.order((appointments::start_time.asc(), appointments::id.asc()));
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let rows = items.load::<DbAppointment>(&mut conn)?;
        load_details(&mut conn, rows)
    }

    fn count_appointments(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total: i64 = appointments::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }

    fn list_booked_lines(&self) -> RepositoryResult<Vec<AppointmentLine>> {
        let mut conn = self.conn()?;
        load_lines(&mut conn, None)
    }
}

impl AppointmentWriter for DieselRepository {
    fn save_booking(
        &self,
        id: Option<AppointmentId>,
        booking: &Booking,
    ) -> RepositoryResult<Appointment> {
        let mut conn = self.conn()?;

        let saved = conn.transaction::<DbAppointment, RepositoryError, _>(|conn| {
            let saved = match id {
                Some(id) => diesel::update(appointments::table.find(id.get()))
                    .set(&UpdateAppointment::from(booking))
                    .returning(DbAppointment::as_returning())
                    .get_result::<DbAppointment>(conn)?,
                None => diesel::insert_into(appointments::table)
                    .values(&NewAppointment::from(booking))
                    .returning(DbAppointment::as_returning())
                    .get_result::<DbAppointment>(conn)?,
            };

            // The booked set is replaced wholesale on every save.
            diesel::delete(
                appointment_services::table
                    .filter(appointment_services::appointment_id.eq(saved.id)),
            )
            .execute(conn)?;

            let rows: Vec<NewAppointmentService> = booking
                .services
                .iter()
                .map(|booked| NewAppointmentService::new(saved.id, booked))
                .collect();
            if !rows.is_empty() {
                diesel::insert_into(appointment_services::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok(saved)
        })?;

        Ok(Appointment::try_from(saved)?)
    }
}
