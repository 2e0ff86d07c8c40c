use crate::constants::header;
use indexmap::IndexMap;

/// Header map in insertion order. Names keep the casing they were set with;
/// lookups elsewhere in the crate compare case-insensitively.
pub type Headers = IndexMap<String, String>;

/// Accumulates response headers during CORS evaluation. `Vary` entries are
/// merged and deduplicated instead of overwritten.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderSet {
    inner: Headers,
}

impl HeaderSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, name: &str, value: impl Into<String>) {
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(value.into());
        } else {
            self.inner.insert(name.to_string(), value.into());
        }
    }

    pub(crate) fn add_vary(&mut self, value: impl Into<String>) {
        let incoming = value.into();
        match self.inner.get_mut(header::VARY) {
            Some(existing) => merge_vary(existing, &incoming),
            None => {
                let trimmed = incoming.trim();
                if !trimmed.is_empty() {
                    self.inner
                        .insert(header::VARY.to_string(), trimmed.to_string());
                }
            }
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.inner
    }
}

/// Applies CORS headers onto an outgoing response's header map, merging
/// `Vary` with whatever the handler already set.
pub(crate) fn apply(target: &mut Headers, incoming: &Headers) {
    for (name, value) in incoming {
        if name.eq_ignore_ascii_case(header::VARY) {
            match lookup_key(target, header::VARY) {
                Some(key) => {
                    if let Some(existing) = target.get_mut(&key) {
                        merge_vary(existing, value);
                    }
                }
                None => {
                    target.insert(header::VARY.to_string(), value.clone());
                }
            }
        } else {
            target.insert(name.clone(), value.clone());
        }
    }
}

fn lookup_key(headers: &Headers, name: &str) -> Option<String> {
    headers
        .keys()
        .find(|key| key.eq_ignore_ascii_case(name))
        .cloned()
}

fn merge_vary(existing: &mut String, incoming: &str) {
    for entry in incoming.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let already_present = existing
            .split(',')
            .map(str::trim)
            .any(|present| present.eq_ignore_ascii_case(entry));
        if !already_present {
            if !existing.is_empty() {
                existing.push_str(", ");
            }
            existing.push_str(entry);
        }
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
