use async_trait::async_trait;
use chrono::prelude::{DateTime, Utc};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::config::MongoSettings;
use crate::error::{Result, TodoError};
use crate::models::todo::{Content, Todo};
use crate::repository::TodoStore;

const APP_NAME: &str = "todo-api";

/// Stored shape of a todo. `createdAt` is a native BSON datetime so the
/// collection sorts on it server side.
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    content: String,
    #[serde(
        rename = "createdAt",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    created_at: DateTime<Utc>,
}

impl From<TodoDocument> for Todo {
    fn from(value: TodoDocument) -> Self {
        Self {
            id: value.id.to_hex(),
            content: value.content,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug)]
pub struct MongoStore {
    client: Client,
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Connects and pings the server so an unreachable database is reported
    /// at startup instead of on the first request.
    pub async fn connect(settings: &MongoSettings) -> Result<Self> {
        let mut client_options = ClientOptions::parse(&settings.uri)
            .await
            .map_err(|e| TodoError::Connection(e.to_string()))?;
        client_options.app_name = Some(APP_NAME.to_string());
        let client = Client::with_options(client_options)
            .map_err(|e| TodoError::Connection(e.to_string()))?;

        let db = client.database(&settings.database);
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| TodoError::Connection(e.to_string()))?;
        tracing::info!(
            database = %settings.database,
            collection = %settings.collection,
            "connected to MongoDB"
        );

        Ok(Self {
            collection: db.collection(&settings.collection),
            client,
        })
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();
        let mut cursor = self.collection.find(None, options).await?;
        let mut result: Vec<Todo> = Vec::new();
        while cursor.advance().await? {
            result.push(cursor.deserialize_current()?.into());
        }
        Ok(result)
    }

    async fn create(&self, content: Content) -> Result<Todo> {
        let document = TodoDocument {
            id: ObjectId::new(),
            content: content.into_inner(),
            // BSON datetimes carry milliseconds.
            created_at: mongodb::bson::DateTime::now().to_chrono(),
        };
        self.collection.insert_one(&document, None).await?;
        tracing::debug!(id = %document.id, "todo inserted");
        Ok(document.into())
    }

    async fn delete(&self, id: &str) -> Result<Option<Todo>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            tracing::debug!(id, "delete with malformed id, nothing to remove");
            return Ok(None);
        };
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": object_id }, None)
            .await?;
        Ok(removed.map(Todo::from))
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB client shut down");
    }
}
