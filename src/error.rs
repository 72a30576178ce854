use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every way a submission can end without reaching the client as an upstream reply.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request body")]
    MalformedBody(String),

    #[error(transparent)]
    Invalid(#[from] formrelay_contact::Error),

    #[error("Captcha token missing")]
    CaptchaTokenMissing,

    #[error("Captcha verification failed{}", verify_detail(.detail))]
    CaptchaVerificationFailed { detail: Option<String> },

    #[error("Server not configured")]
    ServerNotConfigured(&'static str),

    #[error("Email provider unavailable")]
    UpstreamUnavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

fn verify_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(" - verify response: {detail}"))
        .unwrap_or_default()
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MalformedBody(_)
            | RelayError::Invalid(_)
            | RelayError::CaptchaTokenMissing
            | RelayError::CaptchaVerificationFailed { .. } => StatusCode::BAD_REQUEST,
            RelayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            RelayError::ServerNotConfigured(_) | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text shown to the client; never carries internal causes.
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::MalformedBody(reason) => {
                tracing::debug!(reason = %reason, "Rejected malformed request body");
            }
            RelayError::Invalid(e) => {
                tracing::info!(error = %e, "Rejected contact form submission");
            }
            RelayError::CaptchaTokenMissing | RelayError::CaptchaVerificationFailed { .. } => {
                tracing::info!("{}", self);
            }
            RelayError::ServerNotConfigured(missing) => {
                tracing::error!(missing = %missing, "Delivery backend is not configured");
            }
            RelayError::UpstreamUnavailable(e) => {
                tracing::error!(error = %e, "Email provider request failed");
            }
            RelayError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
            }
            RelayError::MethodNotAllowed => {}
        }

        let body = Json(json!({
            "success": false,
            "message": self.client_message(),
        }));

        let mut response = (self.status_code(), body).into_response();
        if matches!(self, RelayError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"));
        }
        response
    }
}
