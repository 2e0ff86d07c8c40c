use crate::constants::SAFELISTED_REQUEST_HEADERS;
use std::collections::HashSet;

/// Configuration for the `Access-Control-Allow-Headers` preflight header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AllowedHeaders {
    /// Accept whatever the preflight asks for and mirror it back. This is
    /// also the only wildcard form browsers honor for credentialed requests.
    #[default]
    Any,
    /// Explicit allow-list. Safelisted request headers are always accepted
    /// on top of the configured names.
    List(Vec<String>),
}

impl AllowedHeaders {
    pub fn any() -> Self {
        Self::Any
    }

    /// Builds an allow-list, trimming whitespace and dropping duplicates
    /// case-insensitively.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut deduped: Vec<String> = Vec::new();
        for value in values.into_iter() {
            let trimmed = value.into().trim().to_string();
            let key = trimmed.to_ascii_lowercase();
            if seen.insert(key) {
                deduped.push(trimmed);
            }
        }

        Self::List(deduped)
    }

    /// Whether every header in a preflight's comma-separated
    /// `Access-Control-Request-Headers` value is acceptable.
    pub(crate) fn allows(&self, requested: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(allowed) => {
                let requested = requested.trim();
                if requested.is_empty() {
                    return true;
                }

                requested
                    .split(',')
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .all(|header| is_safelisted(header) || contains_ignore_case(allowed, header))
            }
        }
    }

    pub(crate) fn list_value(&self) -> Option<String> {
        match self {
            Self::Any => None,
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
        }
    }
}

fn is_safelisted(header: &str) -> bool {
    SAFELISTED_REQUEST_HEADERS
        .iter()
        .any(|safelisted| safelisted.eq_ignore_ascii_case(header))
}

fn contains_ignore_case(allowed: &[String], header: &str) -> bool {
    allowed.iter().any(|value| value.eq_ignore_ascii_case(header))
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
