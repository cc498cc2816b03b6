#![doc = "The `tasklist` library crate."]
#![doc = ""]
#![doc = "Authentication (credential storage, token issuance and the access guard),"]
#![doc = "ownership-scoped todo storage, routing configuration and error handling for the"]
#![doc = "task-list service. The binary (`main.rs`) wires these together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod todos;
pub mod validation;

pub use error::AppError;
pub use state::AppState;
