use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, pet};

/// Human-typed phone shapes: optional `+55`, optional area code (with or
/// without parentheses), 4-5 digit prefix, optional dash, 4 digit suffix.
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+55\s?)?(?:\(?[0-9]{2}\)?\s?)?[0-9]{4,5}-?[0-9]{4}$").expect("phone regex compiles")
});

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Pet }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pet => Entity::has_many(pet::Entity).into(),
        }
    }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn is_valid_phone(raw: &str) -> bool {
    PHONE_RE.is_match(raw.trim())
}

/// Validate a human-typed phone number and rewrite it as `(DD) NNNNN-NNNN`.
///
/// The `+55` country code is dropped; numbers without an area code keep the
/// bare `NNNNN-NNNN` form.
pub fn normalize_phone(raw: &str) -> Result<String, errors::ModelError> {
    let trimmed = raw.trim();
    if !PHONE_RE.is_match(trimmed) {
        return Err(errors::ModelError::Validation(
            "phone must be in format: (XX) XXXXX-XXXX or (XX) XXXX-XXXX".into(),
        ));
    }
    let mut digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if trimmed.starts_with('+') {
        digits.drain(..2);
    }
    let formatted = match digits.len() {
        8 | 9 => {
            let (prefix, suffix) = digits.split_at(digits.len() - 4);
            format!("{prefix}-{suffix}")
        }
        10 | 11 => {
            let (area, rest) = digits.split_at(2);
            let (prefix, suffix) = rest.split_at(rest.len() - 4);
            format!("({area}) {prefix}-{suffix}")
        }
        n => return Err(errors::ModelError::Validation(format!("phone has {n} digits"))),
    };
    Ok(formatted)
}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    let name = name.trim();
    let len = name.chars().count();
    if len < NAME_MIN {
        return Err(errors::ModelError::Validation("name must be at least 2 characters long".into()));
    }
    if len > NAME_MAX {
        return Err(errors::ModelError::Validation("name must be at most 100 characters long".into()));
    }
    Ok(name.to_string())
}

pub async fn create(db: &DatabaseConnection, name: &str, phone: &str) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let phone = normalize_phone(phone)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        phone: Set(phone),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

/// Apply the present fields of a partial update to an already loaded owner.
pub async fn update(
    db: &DatabaseConnection,
    found: Model,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = found.into();
    if let Some(n) = name {
        am.name = Set(validate_name(n)?);
    }
    if let Some(p) = phone {
        am.phone = Set(normalize_phone(p)?);
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(errors::ModelError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_shapes() {
        for raw in ["(81) 98240-2134", "81982402134", "(81)98240-2134", "+55 81 98240-2134", "98240-2134", "3333-4444"] {
            assert!(is_valid_phone(raw), "{raw} should be accepted");
        }
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "abc", "123", "(81) 98240-21345", "81-98240-2134x"] {
            assert!(!is_valid_phone(raw), "{raw} should be rejected");
        }
    }

    #[test]
    fn non_ascii_digits_fail_the_shape_check() {
        let arabic_indic = "\u{668}\u{661}\u{669}\u{668}\u{662}\u{664}\u{660}\u{662}\u{661}\u{663}\u{664}";
        assert!(!is_valid_phone(arabic_indic));
        assert!(!is_valid_phone("(８１) ９８２４０-２１３４"));
        match normalize_phone(arabic_indic) {
            Err(errors::ModelError::Validation(msg)) => assert!(msg.starts_with("phone must be in format")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn normalizes_to_masked_form() {
        assert_eq!(normalize_phone("81982402134").unwrap(), "(81) 98240-2134");
        assert_eq!(normalize_phone("(81) 98240-2134").unwrap(), "(81) 98240-2134");
        assert_eq!(normalize_phone("+5581982402134").unwrap(), "(81) 98240-2134");
        assert_eq!(normalize_phone("(11) 3333-4444").unwrap(), "(11) 3333-4444");
        assert_eq!(normalize_phone("982402134").unwrap(), "98240-2134");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_phone("+55 (81) 98240-2134").unwrap();
        assert_eq!(normalize_phone(&once).unwrap(), once);
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("B").is_err());
        assert_eq!(validate_name("  Bob ").unwrap(), "Bob");
        assert!(validate_name(&"x".repeat(101)).is_err());
    }
}
