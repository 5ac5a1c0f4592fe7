//! JSON endpoints used by the booking dialog.

use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::dto::SearchQuery;
use crate::dto::api::ApiError;
use crate::forms::client::AddClientForm;
use crate::forms::service::AddServiceForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, api as api_service, catalog, clients};

fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ApiError::new("Недостаточно прав."))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ApiError::new("Не найдено."))
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ApiError::new(message))
        }
        ServiceError::Repository(err) => {
            log::error!("API request failed: {err}");
            HttpResponse::InternalServerError()
                .json(ApiError::new("Не удалось сохранить данные."))
        }
    }
}

#[get("/v1/clients")]
pub async fn api_v1_clients(
    params: web::Query<SearchQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_clients(repo.get_ref(), &user, params.into_inner()) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(err) => error_response(err),
    }
}

#[post("/v1/clients")]
/// Quick-add from the booking dialog; answers with the created client.
pub async fn api_v1_create_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddClientForm>,
) -> impl Responder {
    match clients::add_client(repo.get_ref(), &user, form) {
        Ok(client) => HttpResponse::Created().json(client),
        Err(err) => error_response(err),
    }
}

#[get("/v1/services")]
pub async fn api_v1_services(
    params: web::Query<SearchQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_services(repo.get_ref(), &user, params.into_inner()) {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(err) => error_response(err),
    }
}

#[post("/v1/services")]
pub async fn api_v1_create_service(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddServiceForm>,
) -> impl Responder {
    match catalog::add_service(repo.get_ref(), &user, form) {
        Ok(service) => HttpResponse::Created().json(service),
        Err(err) => error_response(err),
    }
}
