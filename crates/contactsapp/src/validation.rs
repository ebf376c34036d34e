//! Contact form validation.
//!
//! Rules applied to the whole form on create, and to the fields present in
//! the patch on update:
//! - `name`: required, at least 2 characters
//! - `email`: required, `local@domain.tld` shape
//! - `phone`: required, `NNN-NNN-NNNN`
//! - `address`: required
//!
//! All failing fields are reported at once so a form can render each message
//! next to its input.

use crate::model::{ContactFormData, ContactPatch};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("valid phone regex"));

const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Address,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => write!(f, "name"),
            FormField::Email => write!(f, "email"),
            FormField::Phone => write!(f, "phone"),
            FormField::Address => write!(f, "address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, field: FormField, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_form(form: &ContactFormData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check(&mut errors, FormField::Name, name_error(&form.name));
    check(&mut errors, FormField::Email, email_error(&form.email));
    check(&mut errors, FormField::Phone, phone_error(&form.phone));
    check(&mut errors, FormField::Address, address_error(&form.address));
    errors.into_result()
}

/// Validates only the fields present in `patch`.
pub fn validate_patch(patch: &ContactPatch) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(name) = &patch.name {
        check(&mut errors, FormField::Name, name_error(name));
    }
    if let Some(email) = &patch.email {
        check(&mut errors, FormField::Email, email_error(email));
    }
    if let Some(phone) = &patch.phone {
        check(&mut errors, FormField::Phone, phone_error(phone));
    }
    if let Some(address) = &patch.address {
        check(&mut errors, FormField::Address, address_error(address));
    }
    errors.into_result()
}

fn check(errors: &mut ValidationErrors, field: FormField, message: Option<&str>) {
    if let Some(message) = message {
        errors.push(field, message);
    }
}

fn name_error(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name.is_empty() {
        Some("Name is required")
    } else if name.chars().count() < MIN_NAME_CHARS {
        Some("Name must be at least 2 characters")
    } else {
        None
    }
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email")
    } else {
        None
    }
}

fn phone_error(phone: &str) -> Option<&'static str> {
    if phone.trim().is_empty() {
        Some("Phone is required")
    } else if !is_valid_phone(phone) {
        Some("Phone must be in format XXX-XXX-XXXX")
    } else {
        None
    }
}

fn address_error(address: &str) -> Option<&'static str> {
    address
        .trim()
        .is_empty()
        .then_some("Address is required")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactFormData {
        ContactFormData::new("Alice", "alice@example.com", "555-123-4567", "1 Main St")
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("111-222-3333"));
        assert!(!is_valid_phone("1112223333"));
        assert!(!is_valid_phone("111-222-333"));
        assert!(!is_valid_phone("abc-def-ghij"));
        assert!(!is_valid_phone(" 111-222-3333"));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("j@x.com"));
        assert!(!is_valid_email("j@x"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two words@x.com"));
    }

    #[test]
    fn test_reports_every_failing_field() {
        let form = ContactFormData::new("A", "bad", "123", "");
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.errors.len(), 4);
        assert_eq!(
            errors.for_field(FormField::Name),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(
            errors.for_field(FormField::Phone),
            Some("Phone must be in format XXX-XXX-XXXX")
        );
        assert_eq!(errors.for_field(FormField::Address), Some("Address is required"));
    }

    #[test]
    fn test_patch_validates_present_fields_only() {
        assert!(validate_patch(&ContactPatch::favourite(true)).is_ok());

        let patch = ContactPatch {
            phone: Some("12-34".to_string()),
            ..Default::default()
        };
        let errors = validate_patch(&patch).unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, FormField::Phone);
    }

    #[test]
    fn test_required_messages() {
        let errors = validate_form(&ContactFormData::default()).unwrap_err();
        assert_eq!(errors.for_field(FormField::Name), Some("Name is required"));
        assert_eq!(errors.for_field(FormField::Email), Some("Email is required"));
        assert_eq!(errors.for_field(FormField::Phone), Some("Phone is required"));
    }
}
