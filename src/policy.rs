use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::origin::AllowedOrigins;
use crate::util::is_http_token;
use thiserror::Error;

/// Cross-origin access policy for an application.
///
/// Constructed once, validated when the application is assembled, and
/// read-only afterwards; concurrent request handling needs no locking.
#[derive(Clone)]
pub struct CorsPolicy {
    pub origins: AllowedOrigins,
    pub methods: AllowedMethods,
    pub headers: AllowedHeaders,
    pub credentials: bool,
    /// Response headers scripts may read, emitted on non-preflight responses.
    pub exposed_headers: Vec<String>,
    /// Preflight cache lifetime in seconds.
    pub max_age: Option<u64>,
    /// Status for accepted preflight responses. Must be 2xx.
    pub preflight_status: u16,
}

impl Default for CorsPolicy {
    /// Permissive development profile: any origin, any method, any header,
    /// credentials off.
    fn default() -> Self {
        Self {
            origins: AllowedOrigins::Any,
            methods: AllowedMethods::Any,
            headers: AllowedHeaders::Any,
            credentials: false,
            exposed_headers: Vec::new(),
            max_age: Some(600),
            preflight_status: 200,
        }
    }
}

/// Startup-time policy misconfigurations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "credentials cannot be combined with a wildcard origin; list the trusted origins, or use a reflecting predicate to opt into echoing every caller"
    )]
    CredentialsRequireSpecificOrigin,
    #[error("allowed header list cannot contain `*`; use AllowedHeaders::any()")]
    WildcardInHeaderList,
    #[error("exposed header list cannot contain `*`; name the headers to expose")]
    WildcardInExposedHeaders,
    #[error("`{0}` is not a valid HTTP header name")]
    InvalidHeaderName(String),
    #[error("preflight success status must be in the 2xx range, got {0}")]
    InvalidPreflightStatus(u16),
}

impl CorsPolicy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.credentials && self.origins.is_wildcard() {
            return Err(ValidationError::CredentialsRequireSpecificOrigin);
        }

        if let AllowedHeaders::List(values) = &self.headers {
            for value in values {
                if value == "*" {
                    return Err(ValidationError::WildcardInHeaderList);
                }
                if !is_http_token(value) {
                    return Err(ValidationError::InvalidHeaderName(value.clone()));
                }
            }
        }

        for value in &self.exposed_headers {
            if value == "*" {
                return Err(ValidationError::WildcardInExposedHeaders);
            }
            if !is_http_token(value) {
                return Err(ValidationError::InvalidHeaderName(value.clone()));
            }
        }

        if !(200..=299).contains(&self.preflight_status) {
            return Err(ValidationError::InvalidPreflightStatus(
                self.preflight_status,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
