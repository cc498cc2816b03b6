use std::sync::Arc;

use crate::auth::{AuthGateway, CredentialStore, TokenService};
use crate::store::{MemoryStore, TodoRepository, UserRepository};
use crate::todos::TodoStore;

/// Shared application state, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGateway,
    pub credentials: CredentialStore,
    pub tokens: TokenService,
    pub todos: TodoStore,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
        jwt_secret: &str,
        bcrypt_cost: u32,
    ) -> Self {
        let credentials = CredentialStore::new(users, bcrypt_cost);
        let tokens = TokenService::new(jwt_secret);
        Self {
            auth: AuthGateway::new(credentials.clone(), tokens.clone()),
            credentials,
            tokens,
            todos: TodoStore::new(todos),
        }
    }

    /// State over a fresh `MemoryStore`, which is also returned for inspection.
    pub fn in_memory(jwt_secret: &str, bcrypt_cost: u32) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = Self::new(store.clone(), store.clone(), jwt_secret, bcrypt_cost);
        (state, store)
    }
}
