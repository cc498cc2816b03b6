pub mod credentials;
pub mod extractors;
pub mod gateway;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{not_empty, Field, FirstViolation};

// Re-export necessary items
pub use credentials::{CredentialStore, Registration};
pub use extractors::AuthenticatedUser;
pub use gateway::AuthGateway;
pub use middleware::AccessGuard;
pub use token::{Claims, Identity, TokenError, TokenService};

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        length(min = 1, max = 50, message = "length must be between 1 and 50 characters")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        length(min = 1, max = 50, message = "length must be between 1 and 50 characters")
    )]
    pub last_name: Option<String>,

    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        email(message = "must be a valid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        length(min = 6, max = 128, message = "length must be between 6 and 128 characters")
    )]
    pub password: Option<String>,
}

impl FirstViolation for SignupRequest {
    const FIELDS: &'static [Field] = &[
        Field::string("first_name", "firstName"),
        Field::string("last_name", "lastName"),
        Field::string("email", "email"),
        Field::string("password", "password"),
    ];
}

impl SignupRequest {
    /// Turns a payload built by `from_json` into a `Registration`.
    pub fn into_registration(self) -> Registration {
        Registration {
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        email(message = "must be a valid email")
    )]
    pub email: Option<String>,

    #[validate(required(message = "is required"), custom = "not_empty")]
    pub password: Option<String>,
}

impl FirstViolation for LoginRequest {
    const FIELDS: &'static [Field] = &[
        Field::string("email", "email"),
        Field::string("password", "password"),
    ];
}

impl LoginRequest {
    /// Returns `(email, password)`.
    pub fn into_credentials(self) -> (String, String) {
        (
            self.email.unwrap_or_default(),
            self.password.unwrap_or_default(),
        )
    }
}

/// `data` member of a successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The JWT for session authentication.
    pub token: String,
}
