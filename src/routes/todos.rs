use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTodoRequest, TodoListQuery, UpdateTodoRequest},
    response::ApiResponse,
    routes::extractors::{TodoId, ValidJson},
    state::AppState,
    todos::Page,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the authenticated user's todos.
///
/// ## Query Parameters:
/// - `skip` (optional): number of todos to skip, default 0.
/// - `limit` (optional): maximum number of todos returned, default 20.
///
/// ## Responses:
/// - `200 OK`: the todos in insertion order.
/// - `400 Bad Request`: `skip` or `limit` is not a non-negative integer, e.g.
///   `"limit" must be a number`.
/// - `401 Unauthorized`: missing, invalid or expired token.
#[get("")]
pub async fn list_todos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<TodoListQuery>,
) -> Result<impl Responder, AppError> {
    let page = Page::from_query(&query)?;
    let todos = state.todos.list(&user.0.id, page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User's todos fetched successfully.",
        todos,
    )))
}

/// Creates a todo owned by the authenticated user.
///
/// The owner always comes from the session; owner-like fields in the body are ignored.
///
/// ## Responses:
/// - `201 Created`: the new todo.
/// - `400 Bad Request`: first validation failure, e.g. `"title" is required`.
/// - `401 Unauthorized`: missing, invalid or expired token.
#[post("")]
pub async fn create_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: ValidJson<CreateTodoRequest>,
) -> Result<impl Responder, AppError> {
    let fields = payload.into_inner().into_fields();
    let todo = state.todos.create(&user.0.id, fields).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Todo created successfully.", todo)))
}

/// Fetches one of the authenticated user's todos.
///
/// ## Responses:
/// - `200 OK`: the todo.
/// - `400 Bad Request`: `id` is not 24 hexadecimal characters.
/// - `404 Not Found`: no such todo for this user.
#[get("/{id}")]
pub async fn get_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: TodoId,
) -> Result<impl Responder, AppError> {
    let todo = state.todos.get(&user.0.id, &id.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Todo details fetched successfully.",
        todo,
    )))
}

/// Applies a partial update; only the fields present in the body change.
///
/// ## Responses:
/// - `200 OK`: the todo after the update.
/// - `400 Bad Request`: bad `id` (checked before the body) or invalid field.
///   A field set to `null` is invalid, not absent.
/// - `404 Not Found`: no such todo for this user.
#[put("/{id}")]
pub async fn update_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: TodoId,
    payload: ValidJson<UpdateTodoRequest>,
) -> Result<impl Responder, AppError> {
    let patch = payload.into_inner().into_patch();
    let todo = state.todos.update(&user.0.id, &id.0, patch).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Todo updated successfully.", todo)))
}

/// Deletes a todo and returns its last state.
#[delete("/{id}")]
pub async fn delete_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: TodoId,
) -> Result<impl Responder, AppError> {
    let todo = state.todos.delete(&user.0.id, &id.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Todo deleted successfully.", todo)))
}
