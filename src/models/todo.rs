use chrono::prelude::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TodoError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`. Older clients send the text as `action`.
/// Only JSON objects are accepted.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(try_from = "Map<String, Value>")]
pub struct NewTodo {
    pub content: Option<String>,
}

impl TryFrom<Map<String, Value>> for NewTodo {
    type Error = String;

    fn try_from(mut body: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let value = match (body.remove("content"), body.remove("action")) {
            (Some(_), Some(_)) => return Err("send either `content` or `action`, not both".to_string()),
            (Some(value), None) | (None, Some(value)) => value,
            (None, None) => Value::Null,
        };
        match value {
            Value::Null => Ok(Self { content: None }),
            Value::String(text) => Ok(Self { content: Some(text) }),
            other => Err(format!("`content` must be a string, got {}", other)),
        }
    }
}

/// Todo text that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    pub fn parse(value: Option<String>) -> Result<Self> {
        match value {
            None => Err(TodoError::Validation("content is required".to_string())),
            Some(text) if text.trim().is_empty() => {
                Err(TodoError::Validation("content must not be empty".to_string()))
            }
            Some(text) => Ok(Self(text)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<NewTodo> for Content {
    type Error = TodoError;

    fn try_from(value: NewTodo) -> Result<Self> {
        Content::parse(value.content)
    }
}
