use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::dto::SearchQuery;
use crate::forms::client::{AddClientForm, SaveClientForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, clients as clients_service};

#[get("/clients")]
pub async fn show_clients(
    query: web::Query<SearchQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_clients_page(repo.get_ref(), &user, query.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "clients",
                &server_config.auth_service_url,
            );
            context.insert("clients", &data.clients);
            context.insert("search_query", &data.search_query);

            render_template(&tera, "clients/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    match clients_service::add_client(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Клиент добавлен.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add a client: {err}");
            FlashMessage::error("Не удалось добавить клиента.").send();
        }
    }
    redirect("/clients")
}

#[post("/clients/save")]
pub async fn save_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    match clients_service::save_client(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Клиент обновлён.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Клиент не найден.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save a client: {err}");
            FlashMessage::error("Не удалось сохранить клиента.").send();
        }
    }
    redirect("/clients")
}
