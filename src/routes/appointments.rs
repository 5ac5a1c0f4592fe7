use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::dto::SearchQuery;
use crate::dto::appointments::AppointmentView;
use crate::forms::appointment::SaveAppointmentForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, appointments as appointments_service};

#[get("/appointments")]
pub async fn show_appointments(
    query: web::Query<SearchQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match appointments_service::load_appointments_page(repo.get_ref(), &user, query.into_inner())
    {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "appointments",
                &server_config.auth_service_url,
            );
            let appointments = data
                .appointments
                .into_iter()
                .map(AppointmentView::from)
                .collect::<Vec<_>>();
            context.insert("appointments", &appointments);
            context.insert("clients", &data.clients);
            context.insert("services", &data.services);
            context.insert("search_query", &data.search_query);

            render_template(&tera, "appointments/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load appointments: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/appointments/save")]
/// Books or rebooks an appointment from the dialog.
///
/// The body is decoded with `serde_html_form` because the dialog posts one
/// `service_ids` field per selected service.
pub async fn save_appointment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form: SaveAppointmentForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse appointment form: {err}");
            FlashMessage::error("Ошибка валидации формы").send();
            return redirect("/appointments");
        }
    };

    match appointments_service::save_appointment(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Запись сохранена.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Запись не найдена.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save an appointment: {err}");
            FlashMessage::error("Не удалось сохранить запись.").send();
        }
    }
    redirect("/appointments")
}
