use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::pet::domain::PetRecord;
use crate::validation::{valid_owner_name, valid_phone};

/// Create payload. `telefone` is accepted as an alias of `phone`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OwnerInput {
    #[validate(custom(function = "valid_owner_name"))]
    pub name: String,
    #[serde(alias = "telefone")]
    #[validate(custom(function = "valid_phone"))]
    pub phone: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OwnerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_owner_name"))]
    pub name: Option<String>,
    #[serde(default, alias = "telefone", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_phone"))]
    pub phone: Option<String>,
}

/// Normalized values ready to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRecord {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner together with the pets currently registered to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerWithPets {
    #[serde(flatten)]
    pub owner: OwnerRecord,
    pub pets: Vec<PetRecord>,
}

impl From<models::owner::Model> for OwnerRecord {
    fn from(m: models::owner::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<OwnerRecord> for models::owner::Model {
    fn from(r: OwnerRecord) -> Self {
        Self { id: r.id, name: r.name, phone: r.phone, created_at: r.created_at.into(), updated_at: r.updated_at.into() }
    }
}
