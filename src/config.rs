use std::fmt;

use actix_web::http::Uri;

use crate::error::{Result, TodoError};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "todo_app";
const DEFAULT_COLLECTION: &str = "todos";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    MongoDb(MongoSettings),
}

#[derive(Clone, PartialEq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

// The URI usually embeds credentials.
impl fmt::Debug for MongoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoSettings")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| TodoError::Config(format!("PORT {:?} is not a valid port: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let store = match var("TODO_STORE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("mongodb") | Some("mongo") => {
                let uri = var("MONGODB_URI").or_else(|| var("DB")).ok_or_else(|| {
                    TodoError::Config("MONGODB_URI (or DB) must be set".to_string())
                })?;
                StoreBackend::MongoDb(MongoSettings {
                    uri,
                    database: var("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                    collection: var("MONGODB_COLLECTION")
                        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                })
            }
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(TodoError::Config(format!(
                    "unknown TODO_STORE {:?}, expected \"mongodb\" or \"memory\"",
                    other
                )))
            }
        };

        let cors_allowed_origins = parse_origins(var("CORS_ALLOWED_ORIGINS").as_deref())?;

        Ok(Self {
            host,
            port,
            store,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: Option<&str>) -> Result<Vec<String>> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect();
    for origin in &origins {
        if origin == "*" {
            return Err(TodoError::Config(
                "CORS_ALLOWED_ORIGINS must list explicit origins, \"*\" is not accepted".to_string(),
            ));
        }
        let valid = origin
            .parse::<Uri>()
            .map(|uri| uri.scheme().is_some() && uri.host().is_some())
            .unwrap_or(false);
        if !valid {
            return Err(TodoError::Config(format!(
                "CORS origin {:?} must look like scheme://host[:port]",
                origin
            )));
        }
    }
    Ok(origins)
}
