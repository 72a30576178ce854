use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::relay::Relay;

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub relay: Arc<Relay>,
}

pub fn router(app_state: AppState) -> Router {
    let submit_path = app_state.config.server.submit_path.clone();

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route(
            &submit_path,
            post(contact::submit)
                .options(contact::preflight)
                .fallback(contact::method_not_allowed),
        )
        .with_state(app_state)
}
