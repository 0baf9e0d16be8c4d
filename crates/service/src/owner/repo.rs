use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use super::domain::{OwnerChanges, OwnerRecord};
use super::repository::OwnerRepository;
use crate::errors::ServiceError;

pub struct SeaOrmOwnerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOwnerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl OwnerRepository for SeaOrmOwnerRepository {
    async fn insert(&self, name: &str, phone: &str) -> Result<OwnerRecord, ServiceError> {
        Ok(models::owner::create(&self.db, name, phone).await?.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<OwnerRecord>, ServiceError> {
        let found = models::owner::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn update(&self, current: OwnerRecord, changes: &OwnerChanges) -> Result<OwnerRecord, ServiceError> {
        let updated = models::owner::update(&self.db, current.into(), changes.name.as_deref(), changes.phone.as_deref()).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = models::owner::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
