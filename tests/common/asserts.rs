#![allow(dead_code)]

use super::headers::{header_value, vary_values};
use crossmount::{CorsDecision, Headers, PreflightRejection};
use std::collections::HashSet;

pub fn assert_forward(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Forward { headers } => headers,
        other => panic!("expected forward decision, got {other:?}"),
    }
}

pub fn assert_preflight_accepted(decision: CorsDecision) -> (u16, Headers) {
    match decision {
        CorsDecision::PreflightAccepted { status, headers } => (status, headers),
        other => panic!("expected accepted preflight, got {other:?}"),
    }
}

pub fn assert_preflight_rejected(decision: CorsDecision) -> (Headers, PreflightRejection) {
    match decision {
        CorsDecision::PreflightRejected { headers, rejection } => (headers, rejection),
        other => panic!("expected rejected preflight, got {other:?}"),
    }
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "header `{name}` mismatch",
    );
}

pub fn assert_vary_eq<'a, I>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let expected: HashSet<String> = expected.into_iter().map(str::to_string).collect();
    assert_eq!(vary_values(headers), expected);
}

pub fn assert_vary_is_empty(headers: &Headers) {
    assert!(
        vary_values(headers).is_empty(),
        "expected no Vary entries, got {:?}",
        vary_values(headers),
    );
}
