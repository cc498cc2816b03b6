//! Persistence seam.
//!
//! The credential and todo layers only talk to these traits. Every todo operation takes
//! the owner and folds it into the lookup itself: `None` means "no such todo for this
//! owner", whether the id is unknown or belongs to someone else.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTodo, NewUser, ObjectId, Todo, TodoPatch, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Persists `new_user`. Fails with `AppError::DuplicateEmail` when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Todos of `owner` in insertion order, after skipping `skip` and keeping at most `limit`.
    async fn list(&self, owner: &ObjectId, skip: i64, limit: i64) -> Result<Vec<Todo>, AppError>;

    async fn find(&self, owner: &ObjectId, id: &ObjectId) -> Result<Option<Todo>, AppError>;

    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError>;

    /// Applies `patch` and returns the updated record.
    async fn update(
        &self,
        owner: &ObjectId,
        id: &ObjectId,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, AppError>;

    /// Removes the todo and returns its last state.
    async fn delete(&self, owner: &ObjectId, id: &ObjectId) -> Result<Option<Todo>, AppError>;
}
