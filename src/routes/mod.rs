pub mod auth;
pub mod extractors;
pub mod health;
pub mod todos;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpResponse};

use crate::auth::AccessGuard;
use crate::error::AppError;

/// Registers the API routes. Mounted under `/api` by the binary.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login),
        )
        .service(
            web::scope("/todos")
                .wrap(AccessGuard)
                .service(todos::list_todos)
                .service(todos::create_todo)
                .service(todos::get_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}

/// Fallback for unknown routes.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Route not found.".into()))
}

// Bodies are first read as untyped JSON, so a `Deserialize` error here is a syntax error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            JsonPayloadError::Deserialize(_) => "Invalid JSON payload.".to_string(),
            other => other.to_string(),
        };
        AppError::ValidationError(message).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = match &err {
            QueryPayloadError::Deserialize(e) => e.to_string(),
            other => other.to_string(),
        };
        AppError::ValidationError(message).into()
    })
}
