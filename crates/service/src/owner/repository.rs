use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{OwnerChanges, OwnerRecord};
use crate::errors::ServiceError;

/// Owner persistence. Values reaching the repository are already normalized.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn insert(&self, name: &str, phone: &str) -> Result<OwnerRecord, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<OwnerRecord>, ServiceError>;
    /// Apply `changes` to a row the caller has already loaded.
    async fn update(&self, current: OwnerRecord, changes: &OwnerChanges) -> Result<OwnerRecord, ServiceError>;
    /// Returns false when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
