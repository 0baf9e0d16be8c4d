use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use service::pet::domain::{PetInput, PetPatch, PetView};

use crate::errors::ApiError;
use crate::extract::CurrentUser;
use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/pets",
    tag = "pets",
    security(("bearer" = [])),
    request_body = crate::openapi::PetRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PetDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Owner not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_pet(
    CurrentUser(caller): CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<PetInput>, ApiError>,
) -> Result<(StatusCode, Json<PetView>), ApiError> {
    let pet = state.pets.create(caller, input).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

#[utoipa::path(
    get,
    path = "/pets",
    tag = "pets",
    security(("bearer" = [])),
    responses((status = 200, description = "All pets", body = [crate::openapi::PetDoc]))
)]
pub async fn list_pets(_caller: CurrentUser, State(state): State<ServerState>) -> Result<Json<Vec<PetView>>, ApiError> {
    let pets = state.pets.list().await?;
    tracing::debug!(count = pets.len(), "list pets");
    Ok(Json(pets))
}

#[utoipa::path(
    get,
    path = "/pets/{id}",
    tag = "pets",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet", body = crate::openapi::PetDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_pet(
    _caller: CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<PetView>, ApiError> {
    Ok(Json(state.pets.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/pets/owner/{owner_id}",
    tag = "pets",
    security(("bearer" = [])),
    params(("owner_id" = Uuid, Path, description = "Owner id")),
    responses((status = 200, description = "Pets of the owner", body = [crate::openapi::PetDoc]))
)]
pub async fn list_pets_by_owner(
    _caller: CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(owner_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<Vec<PetView>>, ApiError> {
    Ok(Json(state.pets.list_by_owner(owner_id).await?))
}

#[utoipa::path(
    patch,
    path = "/pets/{id}",
    tag = "pets",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Pet id")),
    request_body = crate::openapi::PetPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PetDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 403, description = "Caller did not create this pet", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_pet(
    CurrentUser(caller): CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(patch), _): WithRejection<Json<PetPatch>, ApiError>,
) -> Result<Json<PetView>, ApiError> {
    Ok(Json(state.pets.update(caller, id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/pets/{id}",
    tag = "pets",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Pet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Caller did not create this pet", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_pet(
    CurrentUser(caller): CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.pets.remove(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
