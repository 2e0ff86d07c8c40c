pub mod constants;
pub mod ping;

mod allowed_headers;
mod allowed_methods;
mod app;
mod cors;
mod headers;
mod http;
mod origin;
mod policy;
mod router;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use app::{App, AppBuilder, AppError};
pub use cors::{Cors, CorsDecision, CorsRequest, PreflightRejection};
pub use headers::Headers;
pub use http::{Request, Response};
pub use origin::{AllowedOrigins, OriginMatcher, OriginPredicateFn, PatternError};
pub use policy::{CorsPolicy, ValidationError};
pub use router::{Handler, Route, Router};
