use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::ObjectId;
use crate::validation::{not_empty, Field, FirstViolation};

/// Completion state of a todo.
/// Corresponds to the `todo_state` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "todo_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    Completed,
    #[default]
    Incomplete,
}

impl TodoState {
    /// Accepted JSON spellings.
    pub const WIRE_VALUES: &'static [&'static str] = &["completed", "incomplete"];
}

/// A todo item as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: ObjectId,
    pub title: String,
    pub description: Option<String>,
    pub state: TodoState,
    /// The owning user. Set from the authenticated session, never from a payload.
    #[sqlx(rename = "user_id")]
    pub owner: ObjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The client-controlled part of a new todo.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// A todo ready to be written, owner included.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub owner: ObjectId,
    pub fields: TodoFields,
}

/// A partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl Todo {
    /// Creates the stored record for `new_todo` with a fresh id and timestamps.
    pub fn new(new_todo: NewTodo) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title: new_todo.fields.title,
            description: Some(new_todo.fields.description),
            state: new_todo.fields.state,
            owner: new_todo.owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `patch` and bumps `updated_at`.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /todos`. Any owner-like field in the JSON is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        length(min = 3, max = 500, message = "length must be between 3 and 500 characters")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "is required"),
        custom = "not_empty",
        length(min = 3, max = 500, message = "length must be between 3 and 500 characters")
    )]
    pub description: Option<String>,

    pub state: Option<TodoState>,
}

impl FirstViolation for CreateTodoRequest {
    const FIELDS: &'static [Field] = &[
        Field::string("title", "title"),
        Field::string("description", "description"),
        Field::one_of("state", "state", TodoState::WIRE_VALUES),
    ];
}

impl CreateTodoRequest {
    /// The fields of the new todo. Call on a payload built by `from_json`.
    pub fn into_fields(self) -> TodoFields {
        TodoFields {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /todos/{id}`: any subset of the mutable fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(
        custom = "not_empty",
        length(min = 3, max = 500, message = "length must be between 3 and 500 characters")
    )]
    pub title: Option<String>,

    #[validate(
        custom = "not_empty",
        length(min = 3, max = 500, message = "length must be between 3 and 500 characters")
    )]
    pub description: Option<String>,

    pub state: Option<TodoState>,
}

/// A key that is present must hold a valid value; `null` is rejected, not read as absent.
impl FirstViolation for UpdateTodoRequest {
    const FIELDS: &'static [Field] = &[
        Field::string("title", "title"),
        Field::string("description", "description"),
        Field::one_of("state", "state", TodoState::WIRE_VALUES),
    ];
}

impl UpdateTodoRequest {
    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            title: self.title,
            description: self.description,
            state: self.state,
        }
    }
}

/// Query parameters of `GET /todos`, kept raw so a bad value can be reported by name.
#[derive(Debug, Default, Deserialize)]
pub struct TodoListQuery {
    pub skip: Option<String>,
    pub limit: Option<String>,
}
