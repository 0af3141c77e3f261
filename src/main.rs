use anyhow::Context;
use todo_api::config::Config;
use todo_api::{repository, server, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_subscriber("todo-api");

    let config = Config::from_env().context("failed to load configuration")?;
    let store = match repository::connect(&config).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "datastore unavailable, exiting");
            return Err(err).context("failed to connect to the datastore");
        }
    };

    let result = match server::run(&config, store.clone()) {
        Ok(server) => server.await,
        Err(err) => Err(err),
    };
    store.shutdown().await;
    result.context("HTTP server failed")
}
