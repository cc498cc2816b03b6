use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::TokenError;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Guards a scope: every request needs a valid bearer token whose email still belongs
/// to an existing account. On success the `User` is stored in request extensions
/// (see `AuthenticatedUser`); otherwise the request is answered with 401.
pub struct AccessGuard;

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct AccessGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::debug!("rejected {} {}: {}", req.method(), req.path(), err);
                    let response = err.error_response().map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("AppState is not registered".into()))?;

    let token = bearer_token(req)
        .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".into()))?;

    let claims = state.tokens.verify(token).map_err(|e| match e {
        TokenError::Expired => {
            AppError::Unauthorized("Session expired. Please log in again.".into())
        }
        TokenError::Invalid => AppError::Unauthorized("Invalid token.".into()),
    })?;

    // Re-resolved on every request so a removed account locks its tokens out.
    state
        .credentials
        .find_by_email(&claims.identity.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid token. User no longer exists.".into()))
}
