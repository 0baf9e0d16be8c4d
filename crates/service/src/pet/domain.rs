use chrono::{DateTime, NaiveDate, Utc};
use models::errors::ModelError;
use models::pet::Species;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{valid_birth_date, valid_breed, valid_pet_name};

/// Create payload as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PetInput {
    #[validate(custom(function = "valid_pet_name"))]
    pub name: String,
    #[serde(rename = "type")]
    pub species: Species,
    #[serde(rename = "race")]
    #[validate(custom(function = "valid_breed"))]
    pub breed: String,
    #[serde(rename = "dateOfBirth")]
    #[validate(custom(function = "valid_birth_date"))]
    pub date_of_birth: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
}

/// Partial update. There is no creator field: unknown keys such as
/// `createdById` are dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_pet_name"))]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    #[serde(rename = "race", default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_breed"))]
    pub breed: Option<String>,
    #[serde(rename = "dateOfBirth", default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_birth_date"))]
    pub date_of_birth: Option<String>,
    #[serde(rename = "ownerId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
}

/// Normalized column values for an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub species: Option<Species>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
}

impl PetPatch {
    pub fn normalize(&self) -> Result<PetChanges, ModelError> {
        Ok(PetChanges {
            name: self.name.as_deref().map(models::pet::validate_name).transpose()?,
            species: self.species,
            breed: self.breed.as_deref().map(models::pet::validate_breed).transpose()?,
            birth_date: self.date_of_birth.as_deref().map(models::pet::parse_birth_date).transpose()?,
            owner_id: self.owner_id,
        })
    }
}

/// Stored pet without joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub species: Species,
    #[serde(rename = "race")]
    pub breed: String,
    #[serde(rename = "dateOfBirth")]
    pub birth_date: NaiveDate,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    #[serde(rename = "createdById")]
    pub created_by_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Pet joined with narrowed owner and creator projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetView {
    #[serde(flatten)]
    pub pet: PetRecord,
    pub owner: OwnerSummary,
    #[serde(rename = "createdBy")]
    pub created_by: CreatorSummary,
}

impl From<models::pet::Model> for PetRecord {
    fn from(m: models::pet::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            species: m.species,
            breed: m.breed,
            birth_date: m.birth_date,
            owner_id: m.owner_id,
            created_by_id: m.created_by_id,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<PetRecord> for models::pet::Model {
    fn from(r: PetRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            species: r.species,
            breed: r.breed,
            birth_date: r.birth_date,
            owner_id: r.owner_id,
            created_by_id: r.created_by_id,
            created_at: r.created_at.into(),
            updated_at: r.updated_at.into(),
        }
    }
}
