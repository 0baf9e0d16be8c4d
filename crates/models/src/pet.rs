use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};

use crate::{errors, owner, user};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const BREED_MAX: usize = 50;

/// Closed set of supported animals.
///
/// Canonical encoding is upper case (`DOG`/`CAT`) in storage and JSON; decoding
/// accepts any case so lower-case client values round-trip through the same
/// pair of functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Species {
    #[sea_orm(string_value = "DOG")]
    Dog,
    #[sea_orm(string_value = "CAT")]
    Cat,
}

impl Species {
    pub fn as_str(self) -> &'static str {
        match self {
            Species::Dog => "DOG",
            Species::Cat => "CAT",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Species {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DOG" => Ok(Species::Dog),
            "CAT" => Ok(Species::Cat),
            other => Err(errors::ModelError::Validation(format!("type must be a valid pet type, got `{other}`"))),
        }
    }
}

impl Serialize for Species {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Species {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub birth_date: Date,
    pub owner_id: Uuid,
    pub created_by_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    CreatedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(owner::Entity)
                .from(Column::OwnerId)
                .to(owner::Column::Id)
                .into(),
            Relation::CreatedBy => Entity::belongs_to(user::Entity)
                .from(Column::CreatedById)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<owner::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::CreatedBy.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp (date part in UTC is kept).
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, errors::ModelError> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| errors::ModelError::Validation("date of birth must be a valid date".into()))
}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    let name = name.trim();
    let len = name.chars().count();
    if len < NAME_MIN || len > NAME_MAX {
        return Err(errors::ModelError::Validation("name must be between 2 and 50 characters long".into()));
    }
    Ok(name.to_string())
}

pub fn validate_breed(breed: &str) -> Result<String, errors::ModelError> {
    let breed = breed.trim();
    if breed.is_empty() {
        return Err(errors::ModelError::Validation("race is required".into()));
    }
    if breed.chars().count() > BREED_MAX {
        return Err(errors::ModelError::Validation("race must be at most 50 characters long".into()));
    }
    Ok(breed.to_string())
}

/// Field values for a new row; `created_by_id` is fixed here and never touched again.
#[derive(Clone, Debug)]
pub struct NewPet<'a> {
    pub name: &'a str,
    pub species: Species,
    pub breed: &'a str,
    pub birth_date: NaiveDate,
    pub owner_id: Uuid,
    pub created_by_id: Uuid,
}

/// Mutable columns; `created_by_id` is not among them.
#[derive(Clone, Debug, Default)]
pub struct PetChanges<'a> {
    pub name: Option<&'a str>,
    pub species: Option<Species>,
    pub breed: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
}

pub async fn create(db: &DatabaseConnection, new: NewPet<'_>) -> Result<Model, errors::ModelError> {
    let name = validate_name(new.name)?;
    let breed = validate_breed(new.breed)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        species: Set(new.species),
        breed: Set(breed),
        birth_date: Set(new.birth_date),
        owner_id: Set(new.owner_id),
        created_by_id: Set(new.created_by_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

pub async fn update(db: &DatabaseConnection, found: Model, changes: PetChanges<'_>) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = found.into();
    if let Some(n) = changes.name { am.name = Set(validate_name(n)?); }
    if let Some(s) = changes.species { am.species = Set(s); }
    if let Some(b) = changes.breed { am.breed = Set(validate_breed(b)?); }
    if let Some(d) = changes.birth_date { am.birth_date = Set(d); }
    if let Some(o) = changes.owner_id { am.owner_id = Set(o); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(errors::ModelError::from)
}

pub async fn list_by_owner(db: &DatabaseConnection, owner_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
