use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::prelude::*;

use crate::error::{Result, TodoError};
use crate::models::todo::{Content, Todo};
use crate::repository::TodoStore;

/// Records are kept in insertion order, so the newest record is always last.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    todos: Mutex<Vec<Todo>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn todos(&self) -> Result<MutexGuard<'_, Vec<Todo>>> {
        self.todos
            .lock()
            .map_err(|_| TodoError::Datastore("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TodoStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let todos = self.todos()?;
        Ok(todos.iter().rev().cloned().collect())
    }

    async fn create(&self, content: Content) -> Result<Todo> {
        let todo = Todo {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into_inner(),
            created_at: Utc::now(),
        };
        self.todos()?.push(todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: &str) -> Result<Option<Todo>> {
        let mut todos = self.todos()?;
        let Some(index) = todos.iter().position(|todo| todo.id == id) else {
            return Ok(None);
        };
        Ok(Some(todos.remove(index)))
    }
}
