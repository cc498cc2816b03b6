use crate::{
    auth::{LoginRequest, LoginResponse, SignupRequest},
    error::AppError,
    response::ApiResponse,
    routes::extractors::ValidJson,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates the account and answers 201 without a token; clients log in afterwards.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: ValidJson<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let registration = payload.into_inner().into_registration();
    state.auth.signup(registration).await?;

    Ok(HttpResponse::Created().json(ApiResponse::message("User registered successfully.")))
}

/// Login user
///
/// Verifies the credentials and returns a token valid for 24 hours.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: ValidJson<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = payload.into_inner().into_credentials();
    let token = state.auth.login(&email, &password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User logged in successfully.",
        LoginResponse { token },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    async fn post(uri: &str, payload: serde_json::Value) -> (u16, serde_json::Value) {
        let (state, _) = AppState::in_memory("routes-secret", 4);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api").configure(crate::routes::config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_rt::test]
    async fn test_signup_validation() {
        let (status, body) = post(
            "/api/auth/signup",
            json!({ "firstName": "Test", "email": "incomplete@example.com", "password": "password" }),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "\"lastName\" is required");

        let (status, body) = post(
            "/api/auth/signup",
            json!({ "firstName": "Test", "lastName": "User", "email": "invalid-email", "password": "password" }),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], "\"email\" must be a valid email");
    }

    #[actix_rt::test]
    async fn test_login_validation() {
        let (status, body) = post("/api/auth/login", json!({ "password": "password123" })).await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], "\"email\" is required");

        let (status, body) = post("/api/auth/login", json!({ "email": 42, "password": "x" })).await;
        assert_eq!(status, 400);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "\"email\" must be a string");
    }
}
