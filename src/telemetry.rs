use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// Installs a bunyan JSON subscriber on stdout. `RUST_LOG` overrides the
/// default `INFO` filter. Records emitted through `log` (actix's `Logger`
/// middleware) are forwarded into the same pipeline.
pub fn init_subscriber(app_name: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("INFO"));
    let formatting_layer = BunyanFormattingLayer::new(app_name.to_string(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    if let Err(err) = subscriber.try_init() {
        eprintln!("tracing subscriber already installed: {}", err);
    }
}
