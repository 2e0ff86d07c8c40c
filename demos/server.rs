//! Serves an assembled application through axum. Run with
//! `cargo run --example server`, then try:
//!
//! ```text
//! curl -i http://127.0.0.1:8000/ping
//! curl -i -H 'Origin: http://localhost:5173' http://127.0.0.1:8000/greet
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue};
use axum::response::Response as AxumResponse;
use crossmount::{App, CorsPolicy, Request, Response, Router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let greet = Router::new("greet").get("/greet", |request: &Request| {
        let caller = request.header("Origin").unwrap_or("same origin");
        Response::text(200, format!("hello, caller from {caller}"))
    });

    let app = App::builder()
        .cors(CorsPolicy::default())
        .mount(crossmount::ping::router())
        .mount(greet)
        .build()
        .expect("valid application configuration");

    let app = Arc::new(app);
    let service = axum::Router::new().fallback(serve_app).with_state(app);

    let addr: SocketAddr = "127.0.0.1:8000".parse().expect("valid bind address");
    tracing::info!(%addr, "demo server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind demo address");
    axum::serve(listener, service).await.expect("server runs");
}

/// Translates between axum's types and the library's framework-neutral ones.
/// Request bodies are not forwarded; the demo routes never read one.
async fn serve_app(
    State(app): State<Arc<App>>,
    request: axum::extract::Request,
) -> AxumResponse {
    let mut translated = Request::new(request.method().as_str(), request.uri().path());
    for (name, value) in request.headers() {
        if let Ok(value) = value.to_str() {
            translated = translated.with_header(name.as_str(), value);
        }
    }

    let response = app.handle(&translated);

    let mut builder = AxumResponse::builder().status(response.status);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in &response.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
    }

    builder
        .body(Body::from(response.body))
        .expect("valid response")
}
