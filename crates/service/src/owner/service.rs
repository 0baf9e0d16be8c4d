use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::domain::{OwnerChanges, OwnerInput, OwnerPatch, OwnerRecord, OwnerWithPets};
use super::repository::OwnerRepository;
use crate::errors::ServiceError;
use crate::pet::repository::PetRepository;

/// Owner workflows. `actor` is only recorded in traces; any authenticated
/// caller may create, edit or remove owners.
pub struct OwnerService<O: OwnerRepository + ?Sized, P: PetRepository + ?Sized> {
    owners: Arc<O>,
    pets: Arc<P>,
}

impl<O: OwnerRepository + ?Sized, P: PetRepository + ?Sized> OwnerService<O, P> {
    pub fn new(owners: Arc<O>, pets: Arc<P>) -> Self { Self { owners, pets } }

    #[instrument(skip(self, input), fields(actor = %actor))]
    pub async fn create(&self, actor: Uuid, input: OwnerInput) -> Result<OwnerRecord, ServiceError> {
        input.validate()?;
        let name = models::owner::validate_name(&input.name)?;
        let phone = models::owner::normalize_phone(&input.phone)?;
        let owner = self.owners.insert(&name, &phone).await?;
        info!(owner_id = %owner.id, "owner_created");
        Ok(owner)
    }

    pub async fn get(&self, id: Uuid) -> Result<OwnerWithPets, ServiceError> {
        let owner = self.owners.find(id).await?.ok_or_else(|| ServiceError::not_found("Owner", id))?;
        self.with_pets(owner).await
    }

    #[instrument(skip(self, patch), fields(actor = %actor, owner_id = %id))]
    pub async fn update(&self, actor: Uuid, id: Uuid, patch: OwnerPatch) -> Result<OwnerWithPets, ServiceError> {
        let current = self.owners.find(id).await?.ok_or_else(|| ServiceError::not_found("Owner", id))?;
        patch.validate()?;
        let changes = OwnerChanges {
            name: patch.name.as_deref().map(models::owner::validate_name).transpose()?,
            phone: patch.phone.as_deref().map(models::owner::normalize_phone).transpose()?,
        };
        let updated = self.owners.update(current, &changes).await?;
        info!("owner_updated");
        self.with_pets(updated).await
    }

    /// Owners that still have pets are kept; the caller gets `Conflict`.
    #[instrument(skip(self), fields(actor = %actor, owner_id = %id))]
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), ServiceError> {
        if self.owners.find(id).await?.is_none() {
            return Err(ServiceError::not_found("Owner", id));
        }
        let pets = self.pets.list_by_owner(id).await?;
        if !pets.is_empty() {
            return Err(ServiceError::Conflict(format!(
                "Owner with ID {id} still has {} registered pet(s)",
                pets.len()
            )));
        }
        if !self.owners.delete(id).await? {
            return Err(ServiceError::not_found("Owner", id));
        }
        info!("owner_deleted");
        Ok(())
    }

    async fn with_pets(&self, owner: OwnerRecord) -> Result<OwnerWithPets, ServiceError> {
        let pets = self.pets.list_by_owner(owner.id).await?;
        Ok(OwnerWithPets { owner, pets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::pet::repository::NewPetRecord;
    use models::pet::Species;

    fn setup() -> (Arc<MemoryStore>, OwnerService<MemoryStore, MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (store.clone(), OwnerService::new(store.clone(), store))
    }

    fn input(name: &str, phone: &str) -> OwnerInput {
        OwnerInput { name: name.into(), phone: phone.into() }
    }

    #[tokio::test]
    async fn create_normalizes_phone_and_name() {
        let (_, svc) = setup();
        let owner = svc.create(Uuid::new_v4(), input("  Bob ", "81982402134")).await.unwrap();
        assert_eq!(owner.name, "Bob");
        assert_eq!(owner.phone, "(81) 98240-2134");
    }

    #[tokio::test]
    async fn create_rejects_bad_fields() {
        let (_, svc) = setup();
        let err = svc.create(Uuid::new_v4(), input("B", "12")).await.unwrap_err();
        match err {
            ServiceError::Validation(e) => {
                assert!(e.field_errors().contains_key("name"));
                assert!(e.field_errors().contains_key("phone"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_keeps_absent_fields() {
        let (_, svc) = setup();
        let actor = Uuid::new_v4();
        let owner = svc.create(actor, input("Bob", "(81) 98240-2134")).await.unwrap();
        let patch = OwnerPatch { name: Some("Robert".into()), phone: None };
        let updated = svc.update(actor, owner.id, patch).await.unwrap();
        assert_eq!(updated.owner.name, "Robert");
        assert_eq!(updated.owner.phone, "(81) 98240-2134");
        assert!(updated.pets.is_empty());
    }

    #[tokio::test]
    async fn missing_owner_is_not_found() {
        let (_, svc) = setup();
        let id = Uuid::new_v4();
        assert!(matches!(svc.get(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(Uuid::new_v4(), id, OwnerPatch::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(Uuid::new_v4(), id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_with_pets_conflicts() {
        let (store, svc) = setup();
        let actor = Uuid::new_v4();
        let owner = svc.create(actor, input("Bob", "(81) 98240-2134")).await.unwrap();
        PetRepository::insert(
            store.as_ref(),
            NewPetRecord {
                name: "Rex".into(),
                species: Species::Dog,
                breed: "Mutt".into(),
                birth_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                owner_id: owner.id,
                created_by_id: actor,
            },
        )
        .await
        .unwrap();
        assert!(matches!(svc.delete(actor, owner.id).await, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.get(owner.id).await.unwrap().pets.len(), 1);
    }

    #[tokio::test]
    async fn delete_without_pets_removes_owner() {
        let (_, svc) = setup();
        let actor = Uuid::new_v4();
        let owner = svc.create(actor, input("Bob", "(81) 98240-2134")).await.unwrap();
        svc.delete(actor, owner.id).await.unwrap();
        assert!(matches!(svc.get(owner.id).await, Err(ServiceError::NotFound(_))));
    }
}
