//! Syntactic email address check.

use std::sync::OnceLock;

use regex::Regex;

use super::ValidationError;

/// `local@domain.tld`, where local and domain are word characters, dots or
/// hyphens and the final label is word characters only.
const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w+$";

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid email pattern"))
}

/// Check that `email` has the shape of an address.
///
/// No DNS or mailbox verification is attempted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] carrying the raw value when the
/// address does not match.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}
