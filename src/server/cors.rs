use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::IntoResponse,
};

const ALLOW_METHODS: &str = "POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Adds CORS headers to every gateway response. The request's `Origin` is
/// echoed back, or `*` when the request has none.
pub async fn cors_middleware(req: Request, next: Next) -> impl IntoResponse {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );

    response
}
