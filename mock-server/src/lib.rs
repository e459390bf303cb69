use axum::{
    extract::Path,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use tokio::net::TcpListener;
use tracing::debug;

pub const MULTILINE_BODY: &str = "first line\nsecond line\nlast line";

pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/echo", post(echo_form))
        .route("/status/{code}", get(status))
        .route("/multiline", get(multiline))
        .fallback(not_found)
        .layer(middleware::map_response(close_connection))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Clients frame responses by reading until the connection closes, so every
/// response tells hyper to close it, whatever the request asked for.
async fn close_connection(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}

async fn root() -> &'static str {
    "OK"
}

/// Echo the form pairs back in the order they arrived.
async fn echo_form(Form(pairs): Form<Vec<(String, String)>>) -> String {
    debug!(pairs = pairs.len(), "echoing form");
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let reason = status.canonical_reason().unwrap_or("Unknown").replace(' ', "");
    Ok((status, reason))
}

async fn multiline() -> &'static str {
    MULTILINE_BODY
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "NotFound")
}
