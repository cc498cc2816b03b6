use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::ObjectId;
use crate::validation::FirstViolation;

/// A JSON body that passed `FirstViolation::from_json`.
///
/// Syntax errors are reported by the `JsonConfig` error handler; type and rule
/// violations name the first offending field.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T> ValidJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidJson<T>
where
    T: FirstViolation + DeserializeOwned + 'static,
{
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let web::Json(value) = body.await?;
            Ok(ValidJson(T::from_json(value)?))
        })
    }
}

/// The `{id}` path segment of a todo route, parsed as an `ObjectId`.
///
/// List it before any body extractor so a bad id is reported first.
#[derive(Debug, Clone)]
pub struct TodoId(pub ObjectId);

impl FromRequest for TodoId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = match req.match_info().get("id") {
            Some(raw) => ObjectId::parse(raw).map(TodoId),
            None => Err(AppError::ValidationError("ObjectId is required.".to_string())),
        };
        ready(id)
    }
}
