use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::error::JsonPayloadError;
use actix_web::http::{header, Method};
use actix_web::{error, get, web, App, HttpRequest, HttpResponse, HttpServer, Responder};

use crate::config::Config;
use crate::error::TodoError;
use crate::repository::TodoStore;
use crate::{api, Response};

#[get("/health")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> HttpResponse {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    HttpResponse::NotFound().json(response)
}

/// Upper bound for a JSON request body.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Malformed or non-object request bodies are reported like any other
/// validation failure. Oversized bodies answer 413.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> error::Error {
    match err {
        JsonPayloadError::Deserialize(_)
        | JsonPayloadError::ContentType
        | JsonPayloadError::Serialize(_) => {
            TodoError::Validation(format!("invalid request body: {}", err)).into()
        }
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            let response = HttpResponse::PayloadTooLarge().json(Response {
                message: err.to_string(),
            });
            error::InternalError::from_response(err, response).into()
        }
        other => {
            tracing::warn!(error = %other, "failed to read request body");
            other.into()
        }
    }
}

/// Routes, body limits and fallbacks shared by the server and the tests.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error_handler);
    cfg.app_data(json_config)
        .configure(api::config)
        .service(healthcheck)
        .default_service(web::route().to(not_found));
}

pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Binds the listener and returns the server future. The store handle is
/// shared by every worker.
pub fn run(config: &Config, store: Arc<dyn TodoStore>) -> std::io::Result<Server> {
    let store = web::Data::from(store);
    let origins = config.cors_allowed_origins.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(configure_app)
            .wrap(cors(&origins))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))?;

    for addr in server.addrs() {
        tracing::info!(%addr, "listening");
    }
    Ok(server.run())
}
