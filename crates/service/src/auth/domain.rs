use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{not_blank, password_strength};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 3, max = 100, message = "name must be between 3 and 100 characters long"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 6, message = "password must be at least 6 characters long"),
        custom(function = "password_strength")
    )]
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Domain user (business view). Credentials never leave the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str, name: &str, password: &str) -> RegisterInput {
        RegisterInput { email: email.into(), name: name.into(), password: password.into() }
    }

    #[test]
    fn accepts_minimal_valid_registration() {
        assert!(input("a@b.com", "Ann", "Secret1").validate().is_ok());
    }

    #[test]
    fn reports_every_bad_field() {
        let errs = input("not-an-email", "Al", "short").validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn password_rules() {
        assert!(input("a@b.com", "Ann", "secret1").validate().is_err());
        assert!(input("a@b.com", "Ann", "SECRETS").validate().is_err());
        assert!(input("a@b.com", "Ann", "Sec1").validate().is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(input("a@b.com", "     ", "Secret1").validate().is_err());
    }
}
