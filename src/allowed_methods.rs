use crate::constants::method;

/// Configuration for the `Access-Control-Allow-Methods` preflight header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AllowedMethods {
    /// Allow every method. Preflights advertise the concrete method list
    /// rather than a literal `*`, which also keeps the value valid for
    /// credentialed requests.
    #[default]
    Any,
    /// Emit a comma-separated list of methods. Case is preserved to keep
    /// caller intent; matching is case-insensitive.
    List(Vec<String>),
}

impl AllowedMethods {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub(crate) fn allows(&self, requested: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(values) => values
                .iter()
                .any(|method| method.eq_ignore_ascii_case(requested)),
        }
    }

    pub(crate) fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => Some(method::ALL.join(",")),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
        }
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
