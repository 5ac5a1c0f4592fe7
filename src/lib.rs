//! Salon management service: clients, a service catalog and appointments
//! booked against them.
//!
//! With only the `data` feature the crate exposes the domain, Diesel models
//! and repository; `server` adds forms, services, routes and the HTTP server.

pub mod db;
pub mod domain;
mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Role every staff member needs to use the application.
pub const SERVICE_ACCESS_ROLE: &str = "salon";

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use pushkind_common::middleware::RedirectUnauthorized;
    use pushkind_common::models::config::CommonServerConfig;
    use pushkind_common::routes::{logout, not_assigned};
    use tera::Tera;

    use crate::db::establish_connection_pool;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::api::{
        api_v1_clients, api_v1_create_client, api_v1_create_service, api_v1_services,
    };
    use crate::routes::appointments::{save_appointment, show_appointments};
    use crate::routes::catalog::{add_service, save_service, show_services};
    use crate::routes::clients::{add_client, save_client, show_clients};
    use crate::routes::main::show_index;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let common_config = CommonServerConfig {
            auth_service_url: server_config.auth_service_url.clone(),
            secret: server_config.secret.clone(),
        };

        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        // Identity, session and flash cookies are all signed with the shared secret.
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(not_assigned)
                .service(
                    web::scope("/api")
                        .service(api_v1_clients)
                        .service(api_v1_create_client)
                        .service(api_v1_services)
                        .service(api_v1_create_service),
                )
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_index)
                        .service(show_clients)
                        .service(add_client)
                        .service(save_client)
                        .service(show_services)
                        .service(add_service)
                        .service(save_service)
                        .service(show_appointments)
                        .service(save_appointment)
                        .service(logout),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(common_config.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
