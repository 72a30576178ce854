//! Shared setup for router-level tests
//!
//! Every test gets its own pair of mock upstreams so call-count expectations
//! never leak between tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use formrelay::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::MockServer;

pub const SUBMIT_PATH: &str = "/api/submit-form";

pub struct TestApp {
    pub router: Router,
    pub email: MockServer,
    pub captcha: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }
}

/// Configuration pointing every upstream at the given mock servers.
pub fn test_config(email: &MockServer, captcha: &MockServer) -> Config {
    let mut config = Config::default();
    config.web3forms.access_key = Some("test-access-key".to_string());
    config.web3forms.endpoint = format!("{}/submit", email.uri());
    config.captcha.hcaptcha_verify_url = format!("{}/hcaptcha/siteverify", captcha.uri());
    config.captcha.recaptcha_verify_url = format!("{}/recaptcha/siteverify", captcha.uri());
    config
}

pub async fn spawn_app(configure: impl FnOnce(&mut Config)) -> TestApp {
    let email = MockServer::start().await;
    let captcha = MockServer::start().await;

    let mut config = test_config(&email, &captcha);
    configure(&mut config);

    let router = formrelay::create_app(config).expect("app should build");

    TestApp {
        router,
        email,
        captcha,
    }
}

pub fn valid_form() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "company": "Acme",
        "phone": "+1 555 0100",
        "inquiry": "General",
        "message": "I would like to know more about your services."
    })
}

impl TestApp {
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, body: &Value) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(SUBMIT_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.request(request).await
    }
}
