use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Body returned by the delivery backend.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    RawText(String),
}

impl UpstreamBody {
    /// An empty body reads as `{}`.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return UpstreamBody::Json(json!({}));
        }

        match serde_json::from_str(text) {
            Ok(value) => UpstreamBody::Json(value),
            Err(_) => UpstreamBody::RawText(text.to_owned()),
        }
    }
}

/// What the delivery backend answered, before it is mapped onto the client response.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub ok: bool,
    pub body: UpstreamBody,
}

impl UpstreamReply {
    pub fn delivered(message: &str) -> Self {
        Self {
            ok: true,
            body: UpstreamBody::Json(json!({ "success": true, "message": message })),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match (&self.body, self.ok) {
            (UpstreamBody::Json(_), true) => StatusCode::OK,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code() == StatusCode::OK
    }
}

impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self.body {
            UpstreamBody::Json(value) => value,
            UpstreamBody::RawText(text) => json!({ "success": false, "message": text }),
        };

        (status, Json(body)).into_response()
    }
}
