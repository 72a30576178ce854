use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET / - Plain liveness banner for humans poking at the deployment
pub async fn banner() -> &'static str {
    "Server is running"
}

/// GET /health - Liveness probe
/// Returns 200 OK if the process is alive
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_banner() {
        assert_eq!(banner().await, "Server is running");
    }
}
