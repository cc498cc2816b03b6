//! Ownership-scoped todo operations.
//!
//! Every call takes the owner resolved by `AccessGuard`. The owner is part of each
//! storage lookup, so another user's todo is indistinguishable from a missing one and
//! both surface as `AppError::NotFound`.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{NewTodo, ObjectId, Todo, TodoFields, TodoListQuery, TodoPatch};
use crate::store::TodoRepository;
use crate::validation::violation;

pub const DEFAULT_LIMIT: i64 = 20;

/// Offset/limit window for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// An absent or zero `limit` means `DEFAULT_LIMIT`.
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Parses `?skip=&limit=`; `skip` is checked first.
    pub fn from_query(query: &TodoListQuery) -> Result<Self, AppError> {
        let skip = parse_count("skip", query.skip.as_deref())?;
        let limit = parse_count("limit", query.limit.as_deref())?;
        Ok(Self::new(skip, limit))
    }
}

/// A non-negative whole number; `2.0` is accepted, `2.5` is not.
fn parse_count(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let raw = match raw {
        Some(raw) => raw.trim(),
        None => return Ok(None),
    };
    let number = raw
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| violation(name, "must be a number"))?;
    if number.fract() != 0.0 {
        return Err(violation(name, "must be an integer"));
    }
    if number < 0.0 {
        return Err(violation(name, "must be greater than or equal to 0"));
    }
    // Saturates on absurdly large values.
    Ok(Some(number as i64))
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Clone)]
pub struct TodoStore {
    repo: Arc<dyn TodoRepository>,
}

impl TodoStore {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner: &ObjectId, page: Page) -> Result<Vec<Todo>, AppError> {
        self.repo.list(owner, page.skip, page.limit).await
    }

    pub async fn get(&self, owner: &ObjectId, id: &ObjectId) -> Result<Todo, AppError> {
        self.repo.find(owner, id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, owner: &ObjectId, fields: TodoFields) -> Result<Todo, AppError> {
        let todo = self
            .repo
            .create(NewTodo {
                owner: owner.clone(),
                fields,
            })
            .await?;
        log::info!("user {} created todo {}", owner, todo.id);
        Ok(todo)
    }

    pub async fn update(
        &self,
        owner: &ObjectId,
        id: &ObjectId,
        patch: TodoPatch,
    ) -> Result<Todo, AppError> {
        self.repo.update(owner, id, patch).await?.ok_or_else(not_found)
    }

    pub async fn delete(&self, owner: &ObjectId, id: &ObjectId) -> Result<Todo, AppError> {
        let todo = self.repo.delete(owner, id).await?.ok_or_else(not_found)?;
        log::info!("user {} deleted todo {}", owner, todo.id);
        Ok(todo)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Todo not found.".into())
}
