//! # Form Validation
//!
//! Client-side checks run before anything is submitted. Errors are keyed by
//! the field name the backend uses, so a caller can show each message next
//! to its input.

mod rules;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub use rules::{
    is_valid_email, sanitize_phone, validate_lead, validate_login, validate_registration,
};

/// Field-keyed validation failures
///
/// Ordered by field name so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`; the first message per field wins
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message for a single field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Enter a valid email");
        errors.add("email", "something else");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Enter a valid email"));
    }

    #[test]
    fn test_display_is_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("password", "too short");
        errors.add("email", "bad");
        assert_eq!(errors.to_string(), "email: bad; password: too short");
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut errors = ValidationErrors::new();
        errors.add("companyId", "Company ID is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["companyId"], "Company ID is required");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("name", "Full name is required");
        assert!(errors.into_result().is_err());
    }
}
