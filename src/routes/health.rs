use actix_web::{get, HttpResponse, Responder};

use crate::response::ApiResponse;

/// Health check endpoint, reachable without authentication.
#[get("/healthCheck")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::message("Server is working fine."))
}
