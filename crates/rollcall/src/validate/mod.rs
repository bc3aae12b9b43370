//! Record validation and age classification.
//!
//! Everything here is pure: no I/O, no logging, no shared state. Callers own
//! reporting and persistence.
//!
//! # Example
//!
//! ```
//! use rollcall::record::{CandidateRecord, Category};
//! use rollcall::validate::{accept, ValidationError};
//!
//! let ok = accept(&CandidateRecord::new("Alice", "alice@example.com", "30")).unwrap();
//! assert_eq!(ok.category, Category::Adult);
//!
//! let err = accept(&CandidateRecord::new("Al1ce", "alice@example.com", "30")).unwrap_err();
//! assert_eq!(err, ValidationError::InvalidName("Al1ce".to_string()));
//! ```

mod email;

use thiserror::Error;

use crate::record::{CandidateRecord, Category, Registration};

pub use email::validate_email;

/// Why a candidate record was rejected.
///
/// Each variant carries the offending raw field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name was empty or contained a non-alphabetic character.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// The email did not have the `local@domain.tld` shape.
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),

    /// The age was not made of decimal digits only.
    #[error("invalid age: {0:?}")]
    InvalidAge(String),
}

impl ValidationError {
    /// Stable name of the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "InvalidName",
            Self::InvalidEmail(_) => "InvalidEmail",
            Self::InvalidAge(_) => "InvalidAge",
        }
    }

    /// The rejected raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidName(v) | Self::InvalidEmail(v) | Self::InvalidAge(v) => v,
        }
    }

    /// Short explanation suitable for showing to the person typing.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "Invalid name. Only alphabets are allowed.",
            Self::InvalidEmail(_) => "Invalid email format.",
            Self::InvalidAge(_) => "Invalid age. Only positive numbers are allowed.",
        }
    }

    /// Audit log line describing the rejection.
    #[must_use]
    pub fn audit_message(&self) -> String {
        match self {
            Self::InvalidName(v) => format!("Invalid name entered: {v}"),
            Self::InvalidEmail(v) => format!("Invalid email entered: {v}"),
            Self::InvalidAge(v) => format!("Invalid age entered: {v}"),
        }
    }
}

/// Check a name: non-empty and alphabetic letters only.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidName`] otherwise.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if !name.is_empty() && name.chars().all(char::is_alphabetic) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName(name.to_string()))
    }
}

/// Check an age: one or more ASCII digits, nothing else.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAge`] otherwise.
pub fn validate_age(age: &str) -> Result<(), ValidationError> {
    if !age.is_empty() && age.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAge(age.to_string()))
    }
}

/// Validate a candidate record.
///
/// Checks run in the order name, email, age and stop at the first failure.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(record: &CandidateRecord) -> Result<(), ValidationError> {
    validate_name(&record.name)?;
    validate_email(&record.email)?;
    validate_age(&record.age)
}

/// Classify an age.
///
/// Exactly 18 falls into [`Category::Senior`]: the adult range is open on
/// both ends.
#[must_use]
pub fn categorize(age: u64) -> Category {
    if age < 18 {
        Category::Underage
    } else if age > 18 && age < 60 {
        Category::Adult
    } else {
        Category::Senior
    }
}

/// Convert an already validated digit string to an integer.
///
/// Values beyond `u64::MAX` saturate.
fn parse_age(age: &str) -> u64 {
    age.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Validate a candidate and, on success, attach its category.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn accept(record: &CandidateRecord) -> Result<Registration, ValidationError> {
    validate(record)?;
    let category = categorize(parse_age(&record.age));
    Ok(Registration {
        name: record.name.clone(),
        email: record.email.clone(),
        age: record.age.clone(),
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, email: &str, age: &str) -> CandidateRecord {
        CandidateRecord::new(name, email, age)
    }

    #[test]
    fn test_name_alphabetic_passes() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("Zoë").is_ok());
    }

    #[test]
    fn test_name_alphabetic_property() {
        assert!(validate_name("Ⅻ").is_ok());
        assert!(validate_name("a\u{0345}").is_ok());
        assert!(validate_name("A\u{0301}").is_err());
    }

    #[test]
    fn test_name_rejections() {
        for name in ["", "Al1ce", "Alice Smith", "O'Brien", "Anne-Marie", "Bob!"] {
            assert_eq!(
                validate_name(name),
                Err(ValidationError::InvalidName(name.to_string())),
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_age_digits_pass() {
        assert!(validate_age("0").is_ok());
        assert!(validate_age("30").is_ok());
        assert!(validate_age("007").is_ok());
    }

    #[test]
    fn test_age_rejections() {
        for age in ["", "-5", "+5", "3.5", " 30", "30 ", "thirty", "²"] {
            assert_eq!(
                validate_age(age),
                Err(ValidationError::InvalidAge(age.to_string())),
                "age {age:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_categorize_boundaries() {
        assert_eq!(categorize(0), Category::Underage);
        assert_eq!(categorize(17), Category::Underage);
        assert_eq!(categorize(18), Category::Senior);
        assert_eq!(categorize(19), Category::Adult);
        assert_eq!(categorize(59), Category::Adult);
        assert_eq!(categorize(60), Category::Senior);
        assert_eq!(categorize(120), Category::Senior);
    }

    #[test]
    fn test_parse_age_saturates() {
        assert_eq!(parse_age("42"), 42);
        assert_eq!(parse_age("0042"), 42);
        assert_eq!(parse_age("99999999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_first_failure_wins() {
        let err = validate(&candidate("Al1ce", "nope", "-1")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidName("Al1ce".to_string()));

        let err = validate(&candidate("Alice", "nope", "-1")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("nope".to_string()));
    }

    #[test]
    fn test_accept_adult() {
        let registration = accept(&candidate("Alice", "alice@example.com", "30")).unwrap();
        assert_eq!(registration.category, Category::Adult);
        assert_eq!(registration.age, "30");
    }

    #[test]
    fn test_accept_rejects_invalid_name() {
        assert_eq!(
            accept(&candidate("Al1ce", "alice@example.com", "30")),
            Err(ValidationError::InvalidName("Al1ce".to_string()))
        );
    }

    #[test]
    fn test_accept_rejects_invalid_email() {
        assert_eq!(
            accept(&candidate("Alice", "not-an-email", "30")),
            Err(ValidationError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn test_accept_rejects_negative_age() {
        assert_eq!(
            accept(&candidate("Alice", "alice@example.com", "-5")),
            Err(ValidationError::InvalidAge("-5".to_string()))
        );
    }

    #[test]
    fn test_accept_huge_age_is_senior() {
        let registration =
            accept(&candidate("Old", "old@example.com", "123456789012345678901234567890"))
                .unwrap();
        assert_eq!(registration.category, Category::Senior);
    }

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InvalidEmail("x@y".to_string());
        assert_eq!(err.kind(), "InvalidEmail");
        assert_eq!(err.value(), "x@y");
        assert_eq!(err.user_message(), "Invalid email format.");
        assert_eq!(err.audit_message(), "Invalid email entered: x@y");
        assert_eq!(err.to_string(), "invalid email: \"x@y\"");
    }
}
