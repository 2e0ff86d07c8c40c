use crate::http::Response;
use crate::router::Router;

/// Liveness route module. Mount it to answer `GET /ping` with `200 pong`.
pub fn router() -> Router {
    Router::new("ping").get("/ping", |_request| Response::text(200, "pong"))
}
