//! HTTP client for the todo API and the list view driven by it.
//!
//! [`TodoBoard`] keeps no local cache: it loads the whole list when mounted
//! and loads it again after every successful create or delete.

use std::mem;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::todo::{NewTodo, Todo};
use crate::Response;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API url {0}")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API responded {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct TodoClient {
    http: Client,
    base_url: Url,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self.http.get(self.endpoint(&[])?).send().await?;
        decode(response).await
    }

    pub async fn create(&self, content: &str) -> Result<Todo, ClientError> {
        let body = NewTodo {
            content: Some(content.to_string()),
        };
        let response = self
            .http
            .post(self.endpoint(&[])?)
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// `Ok(None)` when the id matched nothing.
    pub async fn delete(&self, id: &str) -> Result<Option<Todo>, ClientError> {
        let response = self.http.delete(self.endpoint(&[id])?).send().await?;
        decode(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "todos"])
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Response>(&body)
        .map(|r| r.message)
        .unwrap_or(body);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Todo>),
}

#[derive(Debug)]
pub struct TodoBoard {
    client: TodoClient,
    state: ViewState,
}

impl TodoBoard {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Records currently shown; empty until the first successful load.
    pub fn todos(&self) -> &[Todo] {
        match &self.state {
            ViewState::Loaded(todos) => todos,
            _ => &[],
        }
    }

    pub async fn mount(&mut self) {
        if self.state == ViewState::Idle {
            self.refresh().await;
        }
    }

    pub async fn add(&mut self, content: &str) {
        if content.trim().is_empty() {
            tracing::warn!("input field required, nothing submitted");
            return;
        }
        match self.client.create(content).await {
            Ok(todo) => {
                tracing::debug!(id = %todo.id, "todo added");
                self.refresh().await;
            }
            Err(err) => tracing::warn!(error = %err, "could not add todo"),
        }
    }

    pub async fn remove(&mut self, id: &str) {
        match self.client.delete(id).await {
            Ok(_) => self.refresh().await,
            Err(err) => tracing::warn!(error = %err, id, "could not delete todo"),
        }
    }

    /// On failure the board goes back to whatever it showed before.
    pub async fn refresh(&mut self) {
        let previous = mem::replace(&mut self.state, ViewState::Loading);
        match self.client.list().await {
            Ok(todos) => self.state = ViewState::Loaded(todos),
            Err(err) => {
                tracing::warn!(error = %err, "could not load todos");
                self.state = previous;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoints_under_api_scope() {
        let client = TodoClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.endpoint(&[]).unwrap().as_str(),
            "http://localhost:8080/api/todos"
        );

        let client = TodoClient::new("http://localhost:8080/proxy/").unwrap();
        assert_eq!(
            client.endpoint(&["a b"]).unwrap().as_str(),
            "http://localhost:8080/proxy/api/todos/a%20b"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            TodoClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            TodoClient::new("mailto:someone@example.com"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn fresh_board_is_idle_and_empty() {
        let board = TodoBoard::new(TodoClient::new("http://localhost:8080").unwrap());
        assert_eq!(board.state(), &ViewState::Idle);
        assert!(board.todos().is_empty());
    }
}
