use crate::util::equals_ignore_case;
use once_cell::sync::Lazy;
use regex_automata::meta::{BuildError, Regex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Decision function over a request origin.
pub type OriginPredicateFn = dyn Fn(&str) -> bool + Send + Sync;

/// Which origins the policy accepts.
#[derive(Clone, Default)]
pub enum AllowedOrigins {
    /// Wildcard: any origin, answered with a literal `*`. Invalid together
    /// with credentials.
    #[default]
    Any,
    /// A single origin; the configured value is echoed back verbatim.
    Exact(String),
    /// A list of matchers; matching origins are reflected back.
    List(Vec<OriginMatcher>),
    /// Arbitrary decision function; accepted origins are reflected back.
    Predicate(Arc<OriginPredicateFn>),
}

/// How the response should advertise the origin, resolved per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OriginDecision {
    Any,
    Exact(String),
    Mirror,
    Disallow,
}

// Origins beyond this length are refused without consulting the matchers.
const MAX_ORIGIN_LENGTH: usize = 4_096;

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 8_192;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("compiling origin pattern took {elapsed:?}, budget is {budget:?}")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

static LOOPBACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://(localhost|127\.0\.0\.1|\[::1\])(:\d+)?$")
        .expect("loopback origin pattern is valid")
});

/// One entry of an [`AllowedOrigins::List`].
#[derive(Clone)]
pub enum OriginMatcher {
    Exact(String),
    Pattern(Regex),
}

impl OriginMatcher {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    /// Compile a case-insensitive pattern matcher. Compilation is bounded in
    /// pattern length and wall-clock budget so configuration cannot stall
    /// startup.
    pub fn pattern(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let started = Instant::now();
        let regex = Regex::new(&format!("(?i:{pattern})"))
            .map_err(|err| PatternError::Build(Box::new(err)))?;
        let elapsed = started.elapsed();
        if elapsed > PATTERN_COMPILE_BUDGET {
            return Err(PatternError::Timeout {
                elapsed,
                budget: PATTERN_COMPILE_BUDGET,
            });
        }

        Ok(Self::Pattern(regex))
    }

    /// Matches http(s) origins on localhost, 127.0.0.1, or [::1], any port.
    /// Handy for development policies.
    pub fn loopback() -> Self {
        Self::Pattern(LOOPBACK_PATTERN.clone())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Exact(value) => equals_ignore_case(value, candidate),
            OriginMatcher::Pattern(regex) => regex.is_match(candidate),
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Exact(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Exact(value.to_owned())
    }
}

impl AllowedOrigins {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    pub(crate) fn resolve(&self, origin: &str) -> OriginDecision {
        if origin.len() > MAX_ORIGIN_LENGTH {
            return OriginDecision::Disallow;
        }

        match self {
            AllowedOrigins::Any => OriginDecision::Any,
            AllowedOrigins::Exact(value) => {
                if equals_ignore_case(value, origin) {
                    OriginDecision::Exact(value.clone())
                } else {
                    OriginDecision::Disallow
                }
            }
            AllowedOrigins::List(matchers) => {
                if matchers.iter().any(|matcher| matcher.matches(origin)) {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                }
            }
            AllowedOrigins::Predicate(predicate) => {
                if predicate(origin) {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                }
            }
        }
    }

    pub(crate) fn is_wildcard(&self) -> bool {
        matches!(self, AllowedOrigins::Any)
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
