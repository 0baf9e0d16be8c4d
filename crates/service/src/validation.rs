//! Field checks shared by the input DTOs.
//!
//! Each check delegates to the rule that lives next to the entity in `models`
//! and turns its message into a `validator` field error, so callers get a
//! per-field report instead of the first failure.

use std::borrow::Cow;

use models::errors::ModelError;
use models::{owner, pet};
use validator::ValidationError;

fn field_error(code: &'static str, err: ModelError) -> ValidationError {
    let msg = match err {
        ModelError::Validation(m) | ModelError::Conflict(m) | ModelError::Db(m) => m,
    };
    ValidationError::new(code).with_message(Cow::Owned(msg))
}

pub fn valid_owner_name(value: &str) -> Result<(), ValidationError> {
    owner::validate_name(value).map(drop).map_err(|e| field_error("name", e))
}

pub fn valid_phone(value: &str) -> Result<(), ValidationError> {
    owner::normalize_phone(value).map(drop).map_err(|e| field_error("phone", e))
}

pub fn valid_pet_name(value: &str) -> Result<(), ValidationError> {
    pet::validate_name(value).map(drop).map_err(|e| field_error("name", e))
}

pub fn valid_breed(value: &str) -> Result<(), ValidationError> {
    pet::validate_breed(value).map(drop).map_err(|e| field_error("race", e))
}

pub fn valid_birth_date(value: &str) -> Result<(), ValidationError> {
    pet::parse_birth_date(value).map(drop).map_err(|e| field_error("dateOfBirth", e))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// At least one upper-case letter and one digit.
pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    let upper = value.chars().any(|c| c.is_uppercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    if upper && digit {
        return Ok(());
    }
    Err(ValidationError::new("password_strength")
        .with_message(Cow::Borrowed("password must contain at least one uppercase letter and one number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_needs_upper_and_digit() {
        assert!(password_strength("Secret1").is_ok());
        assert!(password_strength("secret1").is_err());
        assert!(password_strength("Secrets").is_err());
    }

    #[test]
    fn model_messages_surface_as_field_errors() {
        let err = valid_phone("12").unwrap_err();
        assert_eq!(err.code, "phone");
        assert!(err.message.unwrap().contains("format"));
        assert!(valid_birth_date("2020-02-30").is_err());
        assert!(valid_breed(" ").is_err());
        assert!(valid_pet_name("Rex").is_ok());
        assert!(valid_owner_name("Bo").is_ok());
    }
}
