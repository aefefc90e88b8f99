//! Validation rules for the login, registration and lead forms.

use std::sync::OnceLock;

use regex::Regex;

use super::ValidationErrors;
use crate::auth::{CompanyRegistration, LoginCredentials};
use crate::leads::NewLead;

const MIN_PASSWORD_LEN: usize = 6;
const PHONE_DIGITS: usize = 10;
const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// `local@domain.tld` with no whitespace and exactly one `@`
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Strip everything but ASCII digits, as the phone inputs do on every keystroke
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_phone_number(value: &str) -> bool {
    value.len() == PHONE_DIGITS && value.chars().all(|c| c.is_ascii_digit())
}

/// Login form rules.
///
/// The company ID is only required when the email is not the designated
/// administrator account.
pub fn validate_login(
    credentials: &LoginCredentials,
    admin_email: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !is_valid_email(&credentials.email) {
        errors.add("email", "Enter a valid email");
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }

    let is_admin = admin_email.is_some_and(|admin| admin == credentials.email);
    let company_blank = credentials
        .company_id
        .as_deref()
        .map_or(true, |id| id.trim().is_empty());
    if !is_admin && company_blank {
        errors.add("companyId", "Company ID is required");
    }

    errors.into_result()
}

/// Company registration rules
pub fn validate_registration(details: &CompanyRegistration) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if details.company_name.trim().is_empty() {
        errors.add("companyName", "Company name is required");
    }
    if !is_valid_email(&details.admin_email) {
        errors.add("adminEmail", "Enter a valid email");
    }

    let password = &details.admin_password;
    let strong = password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(&c));
    if !strong {
        errors.add(
            "adminPassword",
            "Password must be 6+ chars, include number & special char",
        );
    }

    errors.into_result()
}

/// Lead form rules. Phones are expected to be sanitised already.
pub fn validate_lead(lead: &NewLead) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if lead.name.trim().is_empty() {
        errors.add("name", "Full name is required");
    }
    if !is_phone_number(&lead.phone1) {
        errors.add("phone1", "Enter a valid 10-digit number");
    }
    if !lead.phone2.is_empty() && !is_phone_number(&lead.phone2) {
        errors.add("phone2", "Secondary phone must be 10 digits");
    }
    if !lead.email.is_empty() && !is_valid_email(&lead.email) {
        errors.add("email", "Enter a valid email");
    }

    errors.into_result()
}
