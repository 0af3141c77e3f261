use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::Response;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not connect to the datastore: {0}")]
    Connection(String),

    #[error("Datastore error: {0}")]
    Datastore(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<mongodb::error::Error> for TodoError {
    fn from(value: mongodb::error::Error) -> Self {
        TodoError::Datastore(value.to_string())
    }
}

impl ResponseError for TodoError {
    fn status_code(&self) -> StatusCode {
        match self {
            TodoError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            TodoError::Validation(msg) => msg.clone(),
            other => {
                tracing::error!(error = %other, "request failed");
                "internal server error".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(Response { message })
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
