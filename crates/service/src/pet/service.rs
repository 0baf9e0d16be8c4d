use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::domain::{PetInput, PetPatch, PetView};
use super::policy::{authorize_mutation, PetAction};
use super::repository::{NewPetRecord, PetRepository};
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::owner::repository::OwnerRepository;

/// Pet workflows. Reads are open to any authenticated caller; update and
/// delete are reserved to the user recorded as the pet's creator.
pub struct PetService<P, O, U>
where
    P: PetRepository + ?Sized,
    O: OwnerRepository + ?Sized,
    U: AuthRepository + ?Sized,
{
    pets: Arc<P>,
    owners: Arc<O>,
    users: Arc<U>,
}

impl<P, O, U> PetService<P, O, U>
where
    P: PetRepository + ?Sized,
    O: OwnerRepository + ?Sized,
    U: AuthRepository + ?Sized,
{
    pub fn new(pets: Arc<P>, owners: Arc<O>, users: Arc<U>) -> Self { Self { pets, owners, users } }

    #[instrument(skip(self, input), fields(caller = %caller, owner_id = %input.owner_id))]
    pub async fn create(&self, caller: Uuid, input: PetInput) -> Result<PetView, ServiceError> {
        input.validate()?;
        let name = models::pet::validate_name(&input.name)?;
        let breed = models::pet::validate_breed(&input.breed)?;
        let birth_date = models::pet::parse_birth_date(&input.date_of_birth)?;

        self.ensure_owner(input.owner_id).await?;
        if self.users.find_user_by_id(caller).await?.is_none() {
            return Err(ServiceError::not_found("User", caller));
        }

        let created = self.pets
            .insert(NewPetRecord {
                name,
                species: input.species,
                breed,
                birth_date,
                owner_id: input.owner_id,
                created_by_id: caller,
            })
            .await?;
        info!(pet_id = %created.id, "pet_created");
        self.view(created.id).await
    }

    pub async fn list(&self) -> Result<Vec<PetView>, ServiceError> {
        self.pets.list_views(None).await
    }

    pub async fn get(&self, id: Uuid) -> Result<PetView, ServiceError> {
        self.view(id).await
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<PetView>, ServiceError> {
        self.pets.list_views(Some(owner_id)).await
    }

    /// Load once, gate on creator, then validate and write.
    #[instrument(skip(self, patch), fields(caller = %caller, pet_id = %id))]
    pub async fn update(&self, caller: Uuid, id: Uuid, patch: PetPatch) -> Result<PetView, ServiceError> {
        let current = authorize_mutation(self.pets.find(id).await?, id, caller, PetAction::Update)?;
        patch.validate()?;
        let changes = patch.normalize()?;
        if let Some(owner_id) = changes.owner_id {
            if owner_id != current.owner_id {
                self.ensure_owner(owner_id).await?;
            }
        }
        let updated = self.pets.update(current, &changes).await?;
        info!("pet_updated");
        self.view(updated.id).await
    }

    #[instrument(skip(self), fields(caller = %caller, pet_id = %id))]
    pub async fn remove(&self, caller: Uuid, id: Uuid) -> Result<(), ServiceError> {
        authorize_mutation(self.pets.find(id).await?, id, caller, PetAction::Delete)?;
        if !self.pets.delete(id).await? {
            return Err(ServiceError::not_found("Pet", id));
        }
        info!("pet_deleted");
        Ok(())
    }

    async fn ensure_owner(&self, owner_id: Uuid) -> Result<(), ServiceError> {
        match self.owners.find(owner_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Owner", owner_id)),
        }
    }

    async fn view(&self, id: Uuid) -> Result<PetView, ServiceError> {
        self.pets.find_view(id).await?.ok_or_else(|| ServiceError::not_found("Pet", id))
    }
}
