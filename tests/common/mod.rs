#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use tasklist::routes::{self, health};
use tasklist::store::MemoryStore;
use tasklist::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "password";

/// Fresh state over an empty in-memory store, with the cheapest bcrypt cost.
pub fn state() -> (AppState, Arc<MemoryStore>) {
    AppState::in_memory(SECRET, 4)
}

/// The same composition as the binary, minus CORS.
pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Logger::default())
            .service(health::health_check)
            .service(web::scope("/api").configure(routes::config))
            .default_service(web::to(routes::not_found)),
    )
    .await
}

/// Sends `req` and returns the status with the JSON body (`Null` when there is none).
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn signup<S, B>(app: &S, email: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "firstName": "Test",
            "lastName": "User",
            "email": email,
            "password": PASSWORD
        }))
        .to_request();
    send(app, req).await
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

/// Signs up `email` and returns a token for it.
pub async fn register_and_login<S, B>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = signup(app, email).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

    let (status, body) = login(app, email, PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Creates a todo through the API and returns the `data` member of the response.
pub async fn create_todo<S, B>(app: &S, token: &str, payload: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(bearer(token))
        .set_json(payload)
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["data"].clone()
}
