use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

/// Middleware adding the CORS headers the website needs on every response
/// - Allow-Origin echoes the request `Origin`, or `*` when there is none
/// - Allow-Methods is limited to `POST, OPTIONS`
/// - Allow-Headers is limited to `Content-Type`
pub async fn cors_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let origin = req.headers().get(header::ORIGIN).cloned();
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    match origin {
        Some(origin) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.append(header::VARY, HeaderValue::from_static("Origin"));
        }
        None => {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            );
        }
    }

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}
