pub mod object_id;
pub mod todo;
pub mod user;

pub use object_id::ObjectId;
pub use todo::{
    CreateTodoRequest, NewTodo, Todo, TodoFields, TodoListQuery, TodoPatch, TodoState,
    UpdateTodoRequest,
};
pub use user::{NewUser, User};
