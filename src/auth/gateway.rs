use crate::auth::credentials::{CredentialStore, Registration};
use crate::auth::token::{Identity, TokenService};
use crate::error::AppError;
use crate::models::User;

/// Signup and login. The only place tokens are produced.
#[derive(Clone)]
pub struct AuthGateway {
    credentials: CredentialStore,
    tokens: TokenService,
}

impl AuthGateway {
    pub fn new(credentials: CredentialStore, tokens: TokenService) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    /// Creates the account. No token is issued; logging in is a separate step.
    pub async fn signup(&self, registration: Registration) -> Result<User, AppError> {
        let user = self.credentials.register(registration).await?;
        log::info!("registered user {}", user.id);
        Ok(user)
    }

    /// Returns a fresh token for the account behind `email`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = match self.credentials.find_by_email(email).await? {
            Some(user) => user,
            None => {
                log::warn!("login attempt for unknown email");
                return Err(AppError::NotFound("User not found.".into()));
            }
        };

        if !self.credentials.verify_user(&user, password).await? {
            log::warn!("login attempt with wrong password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(Identity::from(&user))?;
        log::info!("user {} logged in", user.id);
        Ok(token)
    }
}
