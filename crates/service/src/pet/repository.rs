use async_trait::async_trait;
use chrono::NaiveDate;
use models::pet::Species;
use uuid::Uuid;

use super::domain::{PetChanges, PetRecord, PetView};
use crate::errors::ServiceError;

/// Validated values for a new row.
#[derive(Debug, Clone)]
pub struct NewPetRecord {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub owner_id: Uuid,
    pub created_by_id: Uuid,
}

/// Pet persistence. Listings are ordered by creation time.
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn insert(&self, new: NewPetRecord) -> Result<PetRecord, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<PetRecord>, ServiceError>;
    async fn find_view(&self, id: Uuid) -> Result<Option<PetView>, ServiceError>;
    async fn list_views(&self, owner_id: Option<Uuid>) -> Result<Vec<PetView>, ServiceError>;
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<PetRecord>, ServiceError>;
    /// Apply `changes` to a row the caller has already loaded.
    async fn update(&self, current: PetRecord, changes: &PetChanges) -> Result<PetRecord, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
