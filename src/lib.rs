//! Todo list service: a MongoDB-backed JSON API with create, list and delete,
//! plus a small HTTP client that drives it.

use serde::{Deserialize, Serialize};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod server;
pub mod telemetry;

/// JSON body used for health, error and fallback responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct Response {
    pub message: String,
}
