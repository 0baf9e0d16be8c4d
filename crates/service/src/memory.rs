//! In-memory repositories for tests, doc examples and database-less runs.
//!
//! One `MemoryStore` backs all three repository traits so that pet views can
//! join owners and creators the same way the SQL implementation does. Rows
//! are kept in insertion order, which doubles as creation order.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::owner::domain::{OwnerChanges, OwnerRecord};
use crate::owner::repository::OwnerRepository;
use crate::pet::domain::{CreatorSummary, OwnerSummary, PetChanges, PetRecord, PetView};
use crate::pet::repository::{NewPetRecord, PetRepository};

#[derive(Default)]
struct Tables {
    users: Vec<AuthUser>,
    credentials: Vec<Credentials>,
    owners: Vec<OwnerRecord>,
    pets: Vec<PetRecord>,
}

impl Tables {
    fn view(&self, pet: &PetRecord) -> Result<PetView, ServiceError> {
        let owner = self
            .owners
            .iter()
            .find(|o| o.id == pet.owner_id)
            .ok_or_else(|| ServiceError::Db(format!("pet {} has no owner row", pet.id)))?;
        let creator = self
            .users
            .iter()
            .find(|u| u.id == pet.created_by_id)
            .ok_or_else(|| ServiceError::Db(format!("pet {} has no creator row", pet.id)))?;
        Ok(PetView {
            pet: pet.clone(),
            owner: OwnerSummary { id: owner.id, name: owner.name.clone(), phone: owner.phone.clone() },
            created_by: CreatorSummary { id: creator.id, email: creator.email.clone(), name: creator.name.clone() },
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[async_trait]
impl AuthRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: String,
        password_algorithm: &str,
    ) -> Result<AuthUser, AuthError> {
        let mut t = self.tables.lock().await;
        if t.users.iter().any(|u| u.email == email) {
            return Err(AuthError::Conflict);
        }
        let user = AuthUser { id: Uuid::new_v4(), email: email.to_string(), name: name.to_string(), created_at: Utc::now() };
        t.credentials.push(Credentials {
            user_id: user.id,
            password_hash,
            password_algorithm: password_algorithm.to_string(),
        });
        t.users.push(user.clone());
        Ok(user)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let t = self.tables.lock().await;
        Ok(t.credentials.iter().find(|c| c.user_id == user_id).cloned())
    }
}

#[async_trait]
impl OwnerRepository for MemoryStore {
    async fn insert(&self, name: &str, phone: &str) -> Result<OwnerRecord, ServiceError> {
        let now = Utc::now();
        let owner = OwnerRecord { id: Uuid::new_v4(), name: name.to_string(), phone: phone.to_string(), created_at: now, updated_at: now };
        self.tables.lock().await.owners.push(owner.clone());
        Ok(owner)
    }

    async fn find(&self, id: Uuid) -> Result<Option<OwnerRecord>, ServiceError> {
        let t = self.tables.lock().await;
        Ok(t.owners.iter().find(|o| o.id == id).cloned())
    }

    async fn update(&self, current: OwnerRecord, changes: &OwnerChanges) -> Result<OwnerRecord, ServiceError> {
        let mut t = self.tables.lock().await;
        let row = t
            .owners
            .iter_mut()
            .find(|o| o.id == current.id)
            .ok_or_else(|| ServiceError::not_found("Owner", current.id))?;
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(phone) = &changes.phone {
            row.phone = phone.clone();
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables.lock().await;
        if t.pets.iter().any(|p| p.owner_id == id) {
            return Err(ServiceError::Conflict(format!("Owner with ID {id} is still referenced by pets")));
        }
        let before = t.owners.len();
        t.owners.retain(|o| o.id != id);
        Ok(t.owners.len() < before)
    }
}

#[async_trait]
impl PetRepository for MemoryStore {
    async fn insert(&self, new: NewPetRecord) -> Result<PetRecord, ServiceError> {
        let mut t = self.tables.lock().await;
        if !t.owners.iter().any(|o| o.id == new.owner_id) {
            return Err(ServiceError::not_found("Owner", new.owner_id));
        }
        let now = Utc::now();
        let pet = PetRecord {
            id: Uuid::new_v4(),
            name: new.name,
            species: new.species,
            breed: new.breed,
            birth_date: new.birth_date,
            owner_id: new.owner_id,
            created_by_id: new.created_by_id,
            created_at: now,
            updated_at: now,
        };
        t.pets.push(pet.clone());
        Ok(pet)
    }

    async fn find(&self, id: Uuid) -> Result<Option<PetRecord>, ServiceError> {
        let t = self.tables.lock().await;
        Ok(t.pets.iter().find(|p| p.id == id).cloned())
    }

    async fn find_view(&self, id: Uuid) -> Result<Option<PetView>, ServiceError> {
        let t = self.tables.lock().await;
        t.pets.iter().find(|p| p.id == id).map(|p| t.view(p)).transpose()
    }

    async fn list_views(&self, owner_id: Option<Uuid>) -> Result<Vec<PetView>, ServiceError> {
        let t = self.tables.lock().await;
        t.pets
            .iter()
            .filter(|p| owner_id.map_or(true, |o| p.owner_id == o))
            .map(|p| t.view(p))
            .collect()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<PetRecord>, ServiceError> {
        let t = self.tables.lock().await;
        Ok(t.pets.iter().filter(|p| p.owner_id == owner_id).cloned().collect())
    }

    async fn update(&self, current: PetRecord, changes: &PetChanges) -> Result<PetRecord, ServiceError> {
        let mut t = self.tables.lock().await;
        let row = t
            .pets
            .iter_mut()
            .find(|p| p.id == current.id)
            .ok_or_else(|| ServiceError::not_found("Pet", current.id))?;
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(species) = changes.species {
            row.species = species;
        }
        if let Some(breed) = &changes.breed {
            row.breed = breed.clone();
        }
        if let Some(date) = changes.birth_date {
            row.birth_date = date;
        }
        if let Some(owner_id) = changes.owner_id {
            row.owner_id = owner_id;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables.lock().await;
        let before = t.pets.len();
        t.pets.retain(|p| p.id != id);
        Ok(t.pets.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::domain::{LoginInput, RegisterInput};
    use crate::auth::{AuthConfig, AuthService};

    #[tokio::test]
    async fn duplicate_registration_stores_nothing() {
        let store = Arc::new(MemoryStore::default());
        let auth = AuthService::new(store.clone(), AuthConfig::new("test-secret"));
        let first = auth
            .register(RegisterInput { email: "alice@example.com".into(), name: "Alice".into(), password: "Secret1".into() })
            .await
            .unwrap();
        let err = auth
            .register(RegisterInput { email: "Alice@Example.com".into(), name: "Impostor".into(), password: "Other99X".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict));

        {
            let t = store.tables.lock().await;
            assert_eq!(t.users.len(), 1);
            assert_eq!(t.credentials.len(), 1);
            assert_eq!(t.users[0].id, first.id);
            assert_eq!(t.users[0].name, "Alice");
        }

        let denied = auth.login(LoginInput { email: "alice@example.com".into(), password: "Other99X".into() }).await;
        assert!(matches!(denied, Err(AuthError::Unauthorized)));
    }
}
