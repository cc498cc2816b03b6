use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTodo, NewUser, ObjectId, Todo, TodoPatch, User};

/// Process-local store backed by insertion-ordered vectors.
///
/// Email uniqueness is checked under the write lock, so concurrent signups with the
/// same email cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the account with `email` together with its todos, matching the
    /// `ON DELETE CASCADE` of the SQL schema.
    pub fn remove_user(&self, email: &str) -> Result<Option<User>, AppError> {
        let mut users = write(&self.users)?;
        let removed = match users.iter().position(|user| user.email == email) {
            Some(index) => users.remove(index),
            None => return Ok(None),
        };
        write(&self.todos)?.retain(|todo| todo.owner != removed.id);
        Ok(Some(removed))
    }

    pub fn user_count(&self) -> Result<usize, AppError> {
        Ok(read(&self.users)?.len())
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, AppError> {
    lock.read()
        .map_err(|_| AppError::InternalServerError("memory store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, AppError> {
    lock.write()
        .map_err(|_| AppError::InternalServerError("memory store lock poisoned".into()))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = read(&self.users)?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = write(&self.users)?;
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }
        let user = User::new(new_user);
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn list(&self, owner: &ObjectId, skip: i64, limit: i64) -> Result<Vec<Todo>, AppError> {
        let todos = read(&self.todos)?;
        Ok(todos
            .iter()
            .filter(|todo| &todo.owner == owner)
            .skip(usize::try_from(skip).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find(&self, owner: &ObjectId, id: &ObjectId) -> Result<Option<Todo>, AppError> {
        let todos = read(&self.todos)?;
        Ok(todos
            .iter()
            .find(|todo| &todo.id == id && &todo.owner == owner)
            .cloned())
    }

    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError> {
        let todo = Todo::new(new_todo);
        write(&self.todos)?.push(todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        owner: &ObjectId,
        id: &ObjectId,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        let mut todos = write(&self.todos)?;
        Ok(todos
            .iter_mut()
            .find(|todo| &todo.id == id && &todo.owner == owner)
            .map(|todo| {
                todo.apply(patch);
                todo.clone()
            }))
    }

    async fn delete(&self, owner: &ObjectId, id: &ObjectId) -> Result<Option<Todo>, AppError> {
        let mut todos = write(&self.todos)?;
        let position = todos
            .iter()
            .position(|todo| &todo.id == id && &todo.owner == owner);
        Ok(position.map(|index| todos.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TodoFields, TodoState};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_todo(owner: &ObjectId, title: &str) -> NewTodo {
        NewTodo {
            owner: owner.clone(),
            fields: TodoFields {
                title: title.to_string(),
                description: "description".to_string(),
                state: TodoState::Incomplete,
            },
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("a@x.com")).await.unwrap();

        let duplicate = UserRepository::create(&store, new_user("a@x.com")).await;
        assert!(matches!(duplicate, Err(AppError::DuplicateEmail)));
        assert_eq!(store.user_count().unwrap(), 1);

        // Emails are case-sensitive.
        UserRepository::create(&store, new_user("A@x.com")).await.unwrap();
        assert_eq!(store.user_count().unwrap(), 2);
    }

    #[actix_rt::test]
    async fn test_list_is_owner_scoped_and_paged() {
        let store = MemoryStore::new();
        let alice = ObjectId::new();
        let bob = ObjectId::new();
        for title in ["one", "two", "three"] {
            TodoRepository::create(&store, new_todo(&alice, title)).await.unwrap();
        }
        TodoRepository::create(&store, new_todo(&bob, "bob's")).await.unwrap();

        let all = store.list(&alice, 0, 20).await.unwrap();
        let titles: Vec<_> = all.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);

        let page = store.list(&alice, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "two");

        assert_eq!(store.list(&bob, 0, 20).await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_foreign_todo_is_invisible() {
        let store = MemoryStore::new();
        let alice = ObjectId::new();
        let mallory = ObjectId::new();
        let todo = TodoRepository::create(&store, new_todo(&alice, "secret"))
            .await
            .unwrap();

        assert!(store.find(&mallory, &todo.id).await.unwrap().is_none());
        assert!(store
            .update(&mallory, &todo.id, TodoPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(store.delete(&mallory, &todo.id).await.unwrap().is_none());

        assert_eq!(store.find(&alice, &todo.id).await.unwrap(), Some(todo));
    }

    #[actix_rt::test]
    async fn test_delete_returns_last_state() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let todo = TodoRepository::create(&store, new_todo(&owner, "to delete"))
            .await
            .unwrap();

        let deleted = store.delete(&owner, &todo.id).await.unwrap();
        assert_eq!(deleted, Some(todo.clone()));
        assert!(store.find(&owner, &todo.id).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_remove_user_cascades_to_todos() {
        let store = MemoryStore::new();
        let alice = UserRepository::create(&store, new_user("alice@x.com")).await.unwrap();
        let bob = UserRepository::create(&store, new_user("bob@x.com")).await.unwrap();
        let alices = TodoRepository::create(&store, new_todo(&alice.id, "alice's"))
            .await
            .unwrap();
        TodoRepository::create(&store, new_todo(&bob.id, "bob's")).await.unwrap();

        let removed = store.remove_user("alice@x.com").unwrap();
        assert_eq!(removed.map(|user| user.id), Some(alice.id.clone()));
        assert!(store.find(&alice.id, &alices.id).await.unwrap().is_none());
        assert!(store.list(&alice.id, 0, 20).await.unwrap().is_empty());
        assert_eq!(store.list(&bob.id, 0, 20).await.unwrap().len(), 1);
        assert!(store.remove_user("alice@x.com").unwrap().is_none());
    }
}
