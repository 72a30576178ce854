use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formrelay_contact::ContactForm;

use crate::{error::RelayError, routes::AppState};

/// POST - relays one contact form submission
pub async fn submit(
    State(app_state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Response, RelayError> {
    let Json(form) = payload.map_err(|e| RelayError::MalformedBody(e.body_text()))?;

    let reply = app_state.relay.submit(form).await?;

    Ok(reply.into_response())
}

/// OPTIONS - CORS preflight, headers are added by the CORS middleware
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}
