use std::sync::Arc;

use routeplan::config::Config;
use routeplan::db::InMemoryRouteStore;
use routeplan::engine::Engine;
use routeplan::error::Error;
use routeplan::server::serve;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routeplan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let engine = Engine::new(Arc::new(InMemoryRouteStore::new()));

    serve(engine, &config).await
}
