use std::any::Any;

use axum::{body::Body, http::Response, response::IntoResponse};

use crate::error::RelayError;

/// Turns a handler panic into the generic 500 body; the payload is only logged.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    RelayError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
