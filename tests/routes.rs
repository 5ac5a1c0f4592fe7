use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, Responder, web};
use jsonwebtoken::{EncodingKey, Header, encode};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_salon::routes::api::{
    api_v1_clients, api_v1_create_client, api_v1_create_service, api_v1_services,
};
use serde_json::Value;
use tera::Tera;

mod common;

const SECRET: &str = "route-test-secret";

fn common_config() -> CommonServerConfig {
    CommonServerConfig {
        auth_service_url: "http://localhost:8000".to_string(),
        secret: SECRET.to_string(),
    }
}

fn staff(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "staff-1".to_string(),
        email: "staff@example.com".to_string(),
        hub_id: 1,
        name: "Staff".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: 4_102_444_800,
    }
}

/// Stores the token from the `token` query parameter as the identity.
async fn sign_in(req: HttpRequest, query: web::Query<Vec<(String, String)>>) -> impl Responder {
    let token = query
        .iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    Identity::login(&req.extensions(), token).unwrap();
    HttpResponse::Ok().finish()
}

macro_rules! api_app {
    ($test_db:expr) => {
        actix_test::init_service(
            App::new()
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(common_config()))
                .app_data(web::Data::new($test_db.repo()))
                .route("/test/signin", web::get().to(sign_in))
                .service(
                    web::scope("/api")
                        .service(api_v1_clients)
                        .service(api_v1_create_client)
                        .service(api_v1_services)
                        .service(api_v1_create_service),
                ),
        )
        .await
    };
}

macro_rules! session_cookies {
    ($app:expr, $user:expr) => {{
        let token = encode(
            &Header::default(),
            &$user,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let req = actix_test::TestRequest::get()
            .uri(&format!("/test/signin?token={token}"))
            .to_request();
        let resp = actix_test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        resp.response()
            .cookies()
            .map(Cookie::into_owned)
            .collect::<Vec<_>>()
    }};
}

#[test]
fn page_templates_parse() {
    let tera = Tera::new("templates/**/*").unwrap();
    let names = tera.get_template_names().collect::<Vec<_>>();

    for expected in [
        "base.html",
        "main/index.html",
        "main/not_assigned.html",
        "clients/index.html",
        "services/index.html",
        "appointments/index.html",
    ] {
        assert!(names.contains(&expected), "missing template {expected}");
    }
}

#[actix_web::test]
async fn api_requires_identity() {
    let test_db = common::TestDb::new("test_api_requires_identity.db");
    let app = api_app!(test_db);

    let req = actix_test::TestRequest::get().uri("/api/v1/clients").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn api_rejects_users_without_salon_role() {
    let test_db = common::TestDb::new("test_api_role.db");
    let app = api_app!(test_db);
    let cookies = session_cookies!(app, staff(&["crm"]));

    let mut req = actix_test::TestRequest::get().uri("/api/v1/services");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn api_quick_add_client_then_search() {
    let test_db = common::TestDb::new("test_api_clients.db");
    let app = api_app!(test_db);
    let cookies = session_cookies!(app, staff(&["salon"]));

    let mut create = actix_test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(serde_json::json!({ "name": "Ana Souza", "phone": "555-0101" }));
    for cookie in cookies.iter().cloned() {
        create = create.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, create.to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(resp).await;
    assert_eq!(created["name"], "Ana Souza");
    assert_eq!(created["created_by"], "staff-1");

    let mut blank = actix_test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(serde_json::json!({ "name": "   " }));
    for cookie in cookies.iter().cloned() {
        blank = blank.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, blank.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut search = actix_test::TestRequest::get().uri("/api/v1/clients?search=0101");
    for cookie in cookies.iter().cloned() {
        search = search.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, search.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Value = actix_test::read_body_json(resp).await;
    assert_eq!(found.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn api_quick_add_service() {
    let test_db = common::TestDb::new("test_api_services.db");
    let app = api_app!(test_db);
    let cookies = session_cookies!(app, staff(&["salon"]));

    let mut create = actix_test::TestRequest::post().uri("/api/v1/services").set_json(
        serde_json::json!({ "name": "Corte", "price": "50,50", "duration": "30" }),
    );
    for cookie in cookies.iter().cloned() {
        create = create.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, create.to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(resp).await;
    assert_eq!(created["price"], "50.50");
    assert_eq!(created["duration"], 30);

    let mut negative = actix_test::TestRequest::post().uri("/api/v1/services").set_json(
        serde_json::json!({ "name": "Barba", "price": "-5", "duration": "15" }),
    );
    for cookie in cookies.iter().cloned() {
        negative = negative.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, negative.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
