//! Creator-only mutation gate for pets.
//!
//! The gate works on the row the caller already loaded, so existence and
//! ownership are decided from a single fetch: missing rows are `NotFound`,
//! rows created by someone else are `Forbidden`.

use uuid::Uuid;

use super::domain::PetRecord;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetAction {
    Update,
    Delete,
}

impl PetAction {
    fn verb(self) -> &'static str {
        match self {
            PetAction::Update => "update",
            PetAction::Delete => "delete",
        }
    }
}

/// Anything that remembers who created it.
pub trait CreatedBy {
    fn created_by(&self) -> Uuid;
}

impl CreatedBy for PetRecord {
    fn created_by(&self) -> Uuid { self.created_by_id }
}

pub fn authorize_mutation<T: CreatedBy>(
    found: Option<T>,
    id: Uuid,
    caller: Uuid,
    action: PetAction,
) -> Result<T, ServiceError> {
    let resource = found.ok_or_else(|| ServiceError::not_found("Pet", id))?;
    if resource.created_by() != caller {
        tracing::warn!(pet_id = %id, caller = %caller, action = action.verb(), "pet_mutation_denied");
        return Err(ServiceError::Forbidden(format!(
            "You can only {} pets that you created",
            action.verb()
        )));
    }
    Ok(resource)
}
