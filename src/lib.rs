pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod relay;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use config::Config;
pub use error::RelayError;
pub use routes::AppState;

/// Create the app router
///
/// Builds the relay from configuration and wires every route and layer,
/// useful for integration testing without starting the full server.
pub fn create_app(config: Config) -> anyhow::Result<Router> {
    let relay = relay::Relay::from_config(&config)?;

    Ok(create_app_with_relay(config, Arc::new(relay)))
}

/// Same as [`create_app`] around an already built relay.
pub fn create_app_with_relay(config: Config, relay: Arc<relay::Relay>) -> Router {
    let state = AppState { config, relay };

    routes::router(state)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::cors_middleware))
        .layer(TraceLayer::new_for_http())
}
