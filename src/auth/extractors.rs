use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// The user resolved by `AccessGuard` for the current request.
///
/// Only usable on routes wrapped by `AccessGuard`, which inserts the `User` into
/// request extensions after verifying the token and looking the account up.
/// Handlers take the todo owner from here and nowhere else.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(AuthenticatedUser(user))),
            None => {
                // AccessGuard is missing from this route.
                let err = AppError::Unauthorized("Access denied. No token provided.".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
