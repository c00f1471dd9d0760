//! Syntactic email validation for the lead-capture flow.
//!
//! A fixed grammar check: dotted or quoted local part, dotted domain
//! labels with a top-level label of at least two letters, or a
//! bracketed IPv4 literal as the domain. No deliverability checks.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*|".+")@(?:\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\]|(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,})$"#,
    )
    .expect("email pattern is valid")
});

/// Check whether `input` looks like an email address.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(&input.trim().to_lowercase())
}
