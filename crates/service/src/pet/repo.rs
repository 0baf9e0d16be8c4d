use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::{owner, pet, user};

use super::domain::{CreatorSummary, OwnerSummary, PetChanges, PetRecord, PetView};
use super::repository::{NewPetRecord, PetRepository};
use crate::errors::ServiceError;

pub struct SeaOrmPetRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPetRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Attach owner and creator projections, loading all creators in one query.
    async fn join(&self, rows: Vec<(pet::Model, Option<owner::Model>)>) -> Result<Vec<PetView>, ServiceError> {
        let mut creator_ids: Vec<Uuid> = rows.iter().map(|(p, _)| p.created_by_id).collect();
        creator_ids.sort();
        creator_ids.dedup();
        let creators: HashMap<Uuid, user::Model> = if creator_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(creator_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        rows.into_iter()
            .map(|(p, o)| {
                let o = o.ok_or_else(|| ServiceError::Db(format!("pet {} has no owner row", p.id)))?;
                let u = creators
                    .get(&p.created_by_id)
                    .ok_or_else(|| ServiceError::Db(format!("pet {} has no creator row", p.id)))?;
                Ok(PetView {
                    owner: OwnerSummary { id: o.id, name: o.name, phone: o.phone },
                    created_by: CreatorSummary { id: u.id, email: u.email.clone(), name: u.name.clone() },
                    pet: p.into(),
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl PetRepository for SeaOrmPetRepository {
    async fn insert(&self, new: NewPetRecord) -> Result<PetRecord, ServiceError> {
        let created = pet::create(
            &self.db,
            pet::NewPet {
                name: &new.name,
                species: new.species,
                breed: &new.breed,
                birth_date: new.birth_date,
                owner_id: new.owner_id,
                created_by_id: new.created_by_id,
            },
        )
        .await?;
        Ok(created.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<PetRecord>, ServiceError> {
        Ok(pet::Entity::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn find_view(&self, id: Uuid) -> Result<Option<PetView>, ServiceError> {
        let row = pet::Entity::find_by_id(id)
            .find_also_related(owner::Entity)
            .one(&self.db)
            .await?;
        match row {
            Some(row) => Ok(self.join(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_views(&self, owner_id: Option<Uuid>) -> Result<Vec<PetView>, ServiceError> {
        let mut query = pet::Entity::find()
            .find_also_related(owner::Entity)
            .order_by_asc(pet::Column::CreatedAt);
        if let Some(owner_id) = owner_id {
            query = query.filter(pet::Column::OwnerId.eq(owner_id));
        }
        let rows = query.all(&self.db).await?;
        self.join(rows).await
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<PetRecord>, ServiceError> {
        let rows = pet::list_by_owner(&self.db, owner_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, current: PetRecord, changes: &PetChanges) -> Result<PetRecord, ServiceError> {
        let updated = pet::update(
            &self.db,
            current.into(),
            pet::PetChanges {
                name: changes.name.as_deref(),
                species: changes.species,
                breed: changes.breed.as_deref(),
                birth_date: changes.birth_date,
                owner_id: changes.owner_id,
            },
        )
        .await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = pet::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::{domain::RegisterInput, repo::SeaOrmAuthRepository, AuthConfig, AuthService};
    use crate::owner::{domain::{OwnerInput, OwnerPatch}, repo::SeaOrmOwnerRepository, OwnerService};
    use crate::pet::{domain::{PetInput, PetPatch}, PetService};
    use crate::test_support::get_db;

    #[tokio::test]
    async fn registry_flow_against_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let users = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let owners = Arc::new(SeaOrmOwnerRepository::new(db.clone()));
        let pets = Arc::new(SeaOrmPetRepository::new(db.clone()));

        let auth = AuthService::new(users.clone(), AuthConfig::new("db-test"));
        let owner_svc = OwnerService::new(owners.clone(), pets.clone());
        let pet_svc = PetService::new(pets.clone(), owners.clone(), users.clone());

        let email = format!("svc_{}@example.com", Uuid::new_v4());
        let alice = auth.register(RegisterInput { email, name: "Alice".into(), password: "Secret1".into() }).await?;
        let other = format!("svc_{}@example.com", Uuid::new_v4());
        let carol = auth.register(RegisterInput { email: other, name: "Carol".into(), password: "Secret1".into() }).await?;

        let owner = owner_svc.create(alice.id, OwnerInput { name: "Bob".into(), phone: "81982402134".into() }).await?;
        assert_eq!(owner.phone, "(81) 98240-2134");

        let pet = pet_svc
            .create(
                alice.id,
                PetInput {
                    name: "Rex".into(),
                    species: pet::Species::Dog,
                    breed: "Mutt".into(),
                    date_of_birth: "2020-01-01".into(),
                    owner_id: owner.id,
                },
            )
            .await?;
        assert_eq!(pet.created_by.id, alice.id);
        assert_eq!(pet.owner.phone, owner.phone);

        let denied = pet_svc.update(carol.id, pet.pet.id, PetPatch { name: Some("Max".into()), ..Default::default() }).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        let renamed = pet_svc.update(alice.id, pet.pet.id, PetPatch { name: Some("Max".into()), ..Default::default() }).await?;
        assert_eq!(renamed.pet.name, "Max");
        assert_eq!(renamed.pet.created_by_id, alice.id);

        let listed = pet_svc.list_by_owner(owner.id).await?;
        assert_eq!(listed.len(), 1);

        assert!(matches!(owner_svc.delete(alice.id, owner.id).await, Err(ServiceError::Conflict(_))));
        let patched = owner_svc.update(carol.id, owner.id, OwnerPatch { name: Some("Robert".into()), phone: None }).await?;
        assert_eq!(patched.pets.len(), 1);

        pet_svc.remove(alice.id, pet.pet.id).await?;
        owner_svc.delete(alice.id, owner.id).await?;
        user::Entity::delete_by_id(alice.id).exec(&db).await?;
        user::Entity::delete_by_id(carol.id).exec(&db).await?;
        Ok(())
    }
}
