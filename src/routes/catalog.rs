//! Service catalog pages.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::dto::SearchQuery;
use crate::forms::service::{AddServiceForm, SaveServiceForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, catalog as catalog_service};

#[get("/services")]
pub async fn show_services(
    query: web::Query<SearchQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_services_page(repo.get_ref(), &user, query.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "services",
                &server_config.auth_service_url,
            );
            context.insert("services", &data.services);
            context.insert("search_query", &data.search_query);

            render_template(&tera, "services/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load services: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/services/add")]
pub async fn add_service(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddServiceForm>,
) -> impl Responder {
    match catalog_service::add_service(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Услуга добавлена.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add a service: {err}");
            FlashMessage::error("Не удалось добавить услугу.").send();
        }
    }
    redirect("/services")
}

#[post("/services/save")]
pub async fn save_service(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveServiceForm>,
) -> impl Responder {
    match catalog_service::save_service(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Услуга обновлена.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Услуга не найдена.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save a service: {err}");
            FlashMessage::error("Не удалось сохранить услугу.").send();
        }
    }
    redirect("/services")
}
