use async_trait::async_trait;
use sqlx::PgPool;

use super::{TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTodo, NewUser, ObjectId, Todo, TodoPatch, User};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, password_hash, created_at, updated_at";
const TODO_COLUMNS: &str = "id, title, description, state, user_id, created_at, updated_at";

/// PostgreSQL-backed store. The schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// The `users.email` UNIQUE constraint settles concurrent signups; the losing
    /// insert surfaces as `AppError::DuplicateEmail` through `From<sqlx::Error>`.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = User::new(new_user);
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, email, first_name, last_name, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}

#[async_trait]
impl TodoRepository for PgStore {
    async fn list(&self, owner: &ObjectId, skip: i64, limit: i64) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos WHERE user_id = $1
             ORDER BY created_at, id
             LIMIT $2 OFFSET $3",
            TODO_COLUMNS
        ))
        .bind(owner)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn find(&self, owner: &ObjectId, id: &ObjectId) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos WHERE id = $1 AND user_id = $2",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError> {
        let todo = Todo::new(new_todo);
        let created = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (id, title, description, state, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(&todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.state)
        .bind(&todo.owner)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        owner: &ObjectId,
        id: &ObjectId,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos
             SET title = COALESCE($3, title),
                 description = COALESCE($4, description),
                 state = COALESCE($5, state),
                 updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.state)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn delete(&self, owner: &ObjectId, id: &ObjectId) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "DELETE FROM todos WHERE id = $1 AND user_id = $2 RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }
}
