//! Required-field checks run before anything reaches the database

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("Invalid regex pattern - this is a bug in the codebase")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Validate every item of a create batch; the first failure rejects the batch
pub fn validate_all<T: Validate>(items: &[T]) -> Result<()> {
    items.iter().try_for_each(|item| item.validate())
}

/// Fail with `MissingFields` if any value is blank
pub fn require(values: &[&str]) -> Result<()> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(Error::MissingFields);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Same error kind as a missing field
pub fn require_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(Error::MissingFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@school.edu.au"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_require_blank() {
        assert!(require(&["a", "b"]).is_ok());
        assert!(matches!(require(&["a", ""]), Err(Error::MissingFields)));
        assert!(matches!(require(&["   "]), Err(Error::MissingFields)));
    }
}
