use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::{repo::SeaOrmAuthRepository, repository::AuthRepository, AuthConfig, AuthService};
use service::memory::MemoryStore;
use service::owner::{repo::SeaOrmOwnerRepository, repository::OwnerRepository, OwnerService};
use service::pet::{repo::SeaOrmPetRepository, repository::PetRepository, PetService};

pub type Auth = AuthService<dyn AuthRepository>;
pub type Owners = OwnerService<dyn OwnerRepository, dyn PetRepository>;
pub type Pets = PetService<dyn PetRepository, dyn OwnerRepository, dyn AuthRepository>;

/// Services shared by all handlers.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<Auth>,
    pub owners: Arc<Owners>,
    pub pets: Arc<Pets>,
}

impl ServerState {
    pub fn from_repositories(
        users: Arc<dyn AuthRepository>,
        owners: Arc<dyn OwnerRepository>,
        pets: Arc<dyn PetRepository>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users.clone(), auth)),
            owners: Arc::new(OwnerService::new(owners.clone(), pets.clone())),
            pets: Arc::new(PetService::new(pets, owners, users)),
        }
    }

    pub fn with_database(db: DatabaseConnection, auth: AuthConfig) -> Self {
        Self::from_repositories(
            Arc::new(SeaOrmAuthRepository::new(db.clone())),
            Arc::new(SeaOrmOwnerRepository::new(db.clone())),
            Arc::new(SeaOrmPetRepository::new(db)),
            auth,
        )
    }

    /// Everything kept in process memory; used by tests and local demos.
    pub fn in_memory(auth: AuthConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        Self::from_repositories(store.clone(), store.clone(), store, auth)
    }
}
