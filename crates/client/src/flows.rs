//! Multi-request flows used by the registration screens.

use models::pet::Species;
use service::auth::domain::RegisterInput;
use service::owner::domain::{OwnerInput, OwnerPatch};
use service::pet::domain::{PetInput, PetPatch, PetView};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientResult;
use crate::session::{Session, SessionUser};

/// Pet fields collected before the owner exists.
#[derive(Debug, Clone)]
pub struct PetDraft {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub date_of_birth: String,
}

/// Create the account, then sign in with the same credentials.
pub async fn register_and_login<'s>(
    api: &ApiClient,
    session: &'s mut Session,
    input: RegisterInput,
) -> ClientResult<&'s SessionUser> {
    api.register(&input).await?;
    session.login(api, &input.email, &input.password).await
}

/// Create the owner, then the pet attached to it.
///
/// If the pet is rejected the owner stays registered; the error from the
/// second request is returned.
pub async fn register_pet_with_owner(
    api: &ApiClient,
    session: &mut Session,
    owner: &OwnerInput,
    pet: PetDraft,
) -> ClientResult<PetView> {
    let created = api.create_owner(session, owner).await?;
    let input = PetInput {
        name: pet.name,
        species: pet.species,
        breed: pet.breed,
        date_of_birth: pet.date_of_birth,
        owner_id: created.id,
    };
    api.create_pet(session, &input).await
}

/// Edit an owner and one of their pets from the same form.
///
/// The owner is patched first; the pet patch is then sent with `ownerId` set
/// to the owner that answered, so both records stay linked.
pub async fn update_pet_with_owner(
    api: &ApiClient,
    session: &mut Session,
    pet_id: Uuid,
    owner_id: Uuid,
    owner: &OwnerPatch,
    mut pet: PetPatch,
) -> ClientResult<PetView> {
    let updated = api.update_owner(session, owner_id, owner).await?;
    pet.owner_id = Some(updated.owner.id);
    api.update_pet(session, pet_id, &pet).await
}
