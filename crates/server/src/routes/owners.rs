use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use service::owner::domain::{OwnerInput, OwnerPatch, OwnerRecord, OwnerWithPets};

use crate::errors::ApiError;
use crate::extract::CurrentUser;
use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/owner",
    tag = "owner",
    security(("bearer" = [])),
    request_body = crate::openapi::OwnerRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::OwnerDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_owner(
    CurrentUser(actor): CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<OwnerInput>, ApiError>,
) -> Result<(StatusCode, Json<OwnerRecord>), ApiError> {
    let owner = state.owners.create(actor, input).await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

#[utoipa::path(
    get,
    path = "/owner/{id}",
    tag = "owner",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Owner with pets", body = crate::openapi::OwnerWithPetsDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_owner(
    _caller: CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<OwnerWithPets>, ApiError> {
    Ok(Json(state.owners.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/owner/{id}",
    tag = "owner",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Owner id")),
    request_body = crate::openapi::OwnerPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::OwnerWithPetsDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_owner(
    CurrentUser(actor): CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(patch), _): WithRejection<Json<OwnerPatch>, ApiError>,
) -> Result<Json<OwnerWithPets>, ApiError> {
    Ok(Json(state.owners.update(actor, id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/owner/{id}",
    tag = "owner",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Owner id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Pets still reference this owner", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_owner(
    CurrentUser(actor): CurrentUser,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.owners.delete(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
