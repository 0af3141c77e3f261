use actix_web::{delete, get, post, web, HttpResponse};

use crate::error::Result;
use crate::models::todo::{Content, NewTodo};
use crate::repository::TodoStore;

#[get("/todos")]
pub async fn get_todos(store: web::Data<dyn TodoStore>) -> Result<HttpResponse> {
    let todos = store.list().await?;
    Ok(HttpResponse::Ok().json(todos))
}

#[post("/todos")]
pub async fn create_todo(
    store: web::Data<dyn TodoStore>,
    new_todo: web::Json<NewTodo>,
) -> Result<HttpResponse> {
    let content = Content::try_from(new_todo.into_inner())?;
    let todo = store.create(content).await?;
    tracing::info!(id = %todo.id, "todo created");
    Ok(HttpResponse::Created().json(todo))
}

/// Unknown ids answer 200 with `null`.
#[delete("/todos/{id}")]
pub async fn delete_todo_by_id(
    store: web::Data<dyn TodoStore>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let removed = store.delete(&id).await?;
    match &removed {
        Some(todo) => tracing::info!(id = %todo.id, "todo deleted"),
        None => tracing::debug!(id = %id, "delete matched no todo"),
    }
    Ok(HttpResponse::Ok().json(removed))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(get_todos)
            .service(create_todo)
            .service(delete_todo_by_id),
    );
}
