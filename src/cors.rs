use crate::allowed_headers::AllowedHeaders;
use crate::constants::{header, method};
use crate::headers::{HeaderSet, Headers};
use crate::http::Request;
use crate::origin::OriginDecision;
use crate::policy::{CorsPolicy, ValidationError};
use std::fmt;

/// The CORS-relevant slice of an inbound request.
#[derive(Debug, Clone)]
pub struct CorsRequest<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub requested_method: Option<&'a str>,
    pub requested_headers: Option<&'a str>,
}

impl<'a> CorsRequest<'a> {
    pub fn from_request(request: &'a Request) -> Self {
        Self {
            method: request.method(),
            origin: request.header(header::ORIGIN),
            requested_method: request.header(header::ACCESS_CONTROL_REQUEST_METHOD),
            requested_headers: request.header(header::ACCESS_CONTROL_REQUEST_HEADERS),
        }
    }

    /// A preflight is an OPTIONS request that names the method it asks
    /// permission for. A plain OPTIONS request is dispatched normally.
    fn is_preflight(&self) -> bool {
        self.method.eq_ignore_ascii_case(method::OPTIONS)
            && trimmed(self.requested_method).is_some()
    }
}

/// Why a preflight was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightRejection {
    OriginNotAllowed,
    MethodNotAllowed { requested: String },
    HeadersNotAllowed { requested: String },
}

impl fmt::Display for PreflightRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightRejection::OriginNotAllowed => write!(f, "origin not allowed"),
            PreflightRejection::MethodNotAllowed { requested } => {
                write!(f, "method `{requested}` not allowed")
            }
            PreflightRejection::HeadersNotAllowed { requested } => {
                write!(f, "headers `{requested}` not allowed")
            }
        }
    }
}

/// Outcome of evaluating one request against the policy.
#[derive(Debug, Clone)]
pub enum CorsDecision {
    /// Preflight satisfied. Answer immediately; never dispatch to a handler.
    PreflightAccepted { status: u16, headers: Headers },
    /// Preflight refused. Answer immediately with the rejection.
    PreflightRejected {
        headers: Headers,
        rejection: PreflightRejection,
    },
    /// Request carries an `Origin` header: dispatch it, then attach these
    /// headers to the response. A disallowed origin still gets dispatched;
    /// the browser enforces the missing allow-origin header, not the server.
    Forward { headers: Headers },
    /// No `Origin` header; CORS does not apply.
    NotApplicable,
}

/// The policy engine. Validates its policy once at construction, then
/// evaluates requests without locking or mutation.
pub struct Cors {
    policy: CorsPolicy,
}

impl Cors {
    pub fn new(policy: CorsPolicy) -> Result<Self, ValidationError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &CorsPolicy {
        &self.policy
    }

    pub fn check(&self, request: &CorsRequest<'_>) -> CorsDecision {
        let Some(origin) = trimmed(request.origin) else {
            return CorsDecision::NotApplicable;
        };

        if request.is_preflight() {
            self.check_preflight(origin, request)
        } else {
            self.check_actual(origin)
        }
    }

    fn check_preflight(&self, origin: &str, request: &CorsRequest<'_>) -> CorsDecision {
        let mut headers = HeaderSet::new();

        match self.resolve_origin(origin, &mut headers) {
            Allowed::Yes => {}
            Allowed::No => {
                return CorsDecision::PreflightRejected {
                    headers: headers.into_headers(),
                    rejection: PreflightRejection::OriginNotAllowed,
                };
            }
        }

        // is_preflight guarantees the requested method is present.
        let requested_method = trimmed(request.requested_method).unwrap_or_default();
        if !self.policy.methods.allows(requested_method) {
            return CorsDecision::PreflightRejected {
                headers: headers.into_headers(),
                rejection: PreflightRejection::MethodNotAllowed {
                    requested: requested_method.to_string(),
                },
            };
        }

        let requested_headers = trimmed(request.requested_headers);
        if let Some(value) = requested_headers
            && !self.policy.headers.allows(value)
        {
            return CorsDecision::PreflightRejected {
                headers: headers.into_headers(),
                rejection: PreflightRejection::HeadersNotAllowed {
                    requested: value.to_string(),
                },
            };
        }

        if self.policy.credentials {
            headers.set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
        if let Some(value) = self.policy.methods.header_value() {
            headers.set(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        match &self.policy.headers {
            AllowedHeaders::Any => {
                headers.add_vary(header::ACCESS_CONTROL_REQUEST_HEADERS);
                if let Some(value) = requested_headers {
                    headers.set(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
                }
            }
            AllowedHeaders::List(_) => {
                if let Some(value) = self.policy.headers.list_value() {
                    headers.set(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
                }
            }
        }
        if let Some(seconds) = self.policy.max_age {
            headers.set(header::ACCESS_CONTROL_MAX_AGE, seconds.to_string());
        }

        CorsDecision::PreflightAccepted {
            status: self.policy.preflight_status,
            headers: headers.into_headers(),
        }
    }

    fn check_actual(&self, origin: &str) -> CorsDecision {
        let mut headers = HeaderSet::new();

        if let Allowed::Yes = self.resolve_origin(origin, &mut headers) {
            if self.policy.credentials {
                headers.set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            }
            if !self.policy.exposed_headers.is_empty() {
                headers.set(
                    header::ACCESS_CONTROL_EXPOSE_HEADERS,
                    self.policy.exposed_headers.join(","),
                );
            }
        }

        CorsDecision::Forward {
            headers: headers.into_headers(),
        }
    }

    fn resolve_origin(&self, origin: &str, headers: &mut HeaderSet) -> Allowed {
        match self.policy.origins.resolve(origin) {
            OriginDecision::Any => {
                headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
                Allowed::Yes
            }
            OriginDecision::Exact(value) => {
                headers.add_vary(header::ORIGIN);
                headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
                Allowed::Yes
            }
            OriginDecision::Mirror => {
                headers.add_vary(header::ORIGIN);
                headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                Allowed::Yes
            }
            OriginDecision::Disallow => {
                // The cache key still depends on the origin even when the
                // response omits the allow-origin header.
                headers.add_vary(header::ORIGIN);
                Allowed::No
            }
        }
    }
}

enum Allowed {
    Yes,
    No,
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
