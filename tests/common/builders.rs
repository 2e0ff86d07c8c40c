#![allow(dead_code)]

use crossmount::constants::method;
use crossmount::{
    AllowedHeaders, AllowedMethods, AllowedOrigins, Cors, CorsDecision, CorsPolicy, CorsRequest,
};

#[derive(Default)]
pub struct PolicyBuilder {
    origins: Option<AllowedOrigins>,
    methods: Option<AllowedMethods>,
    headers: Option<AllowedHeaders>,
    credentials: Option<bool>,
    exposed_headers: Option<Vec<String>>,
    max_age: Option<Option<u64>>,
    preflight_status: Option<u16>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins(mut self, origins: AllowedOrigins) -> Self {
        self.origins = Some(origins);
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(AllowedMethods::list(methods));
        self
    }

    pub fn headers(mut self, headers: AllowedHeaders) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = Some(enabled);
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposed_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn max_age(mut self, seconds: Option<u64>) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn preflight_status(mut self, status: u16) -> Self {
        self.preflight_status = Some(status);
        self
    }

    pub fn policy(self) -> CorsPolicy {
        let defaults = CorsPolicy::default();
        CorsPolicy {
            origins: self.origins.unwrap_or(defaults.origins),
            methods: self.methods.unwrap_or(defaults.methods),
            headers: self.headers.unwrap_or(defaults.headers),
            credentials: self.credentials.unwrap_or(defaults.credentials),
            exposed_headers: self.exposed_headers.unwrap_or(defaults.exposed_headers),
            max_age: self.max_age.unwrap_or(defaults.max_age),
            preflight_status: self.preflight_status.unwrap_or(defaults.preflight_status),
        }
    }

    pub fn build(self) -> Cors {
        Cors::new(self.policy()).expect("valid CORS policy")
    }
}

pub struct SimpleRequestBuilder {
    method: String,
    origin: Option<String>,
}

impl SimpleRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        let request = CorsRequest {
            method: &self.method,
            origin: self.origin.as_deref(),
            requested_method: None,
            requested_headers: None,
        };
        cors.check(&request)
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        let request = CorsRequest {
            method: method::OPTIONS,
            origin: self.origin.as_deref(),
            requested_method: self.request_method.as_deref(),
            requested_headers: self.request_headers.as_deref(),
        };
        cors.check(&request)
    }
}

pub fn policy() -> PolicyBuilder {
    PolicyBuilder::new()
}

pub fn simple_request() -> SimpleRequestBuilder {
    SimpleRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
