use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub error: String,
    pub message: String,
    /// Only present for validation failures: field name to messages.
    pub fields: Option<std::collections::BTreeMap<String, Vec<String>>>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(Serialize, ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
pub struct UserDoc {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct PublicUserDoc { pub id: Uuid, pub email: String, pub name: String }

#[derive(Serialize, ToSchema)]
pub struct LoginResponseDoc { pub access_token: String, pub user: PublicUserDoc }

#[derive(Serialize, ToSchema)]
pub struct OwnerRequest { pub name: String, pub phone: String }

#[derive(Serialize, ToSchema)]
pub struct OwnerPatchDoc { pub name: Option<String>, pub phone: Option<String> }

#[derive(Serialize, ToSchema)]
pub struct OwnerDoc {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct OwnerWithPetsDoc {
    #[serde(flatten)]
    pub owner: OwnerDoc,
    pub pets: Vec<PetRecordDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct PetRequest {
    pub name: String,
    /// `DOG` or `CAT`, any case
    #[serde(rename = "type")]
    pub species: String,
    pub race: String,
    /// `YYYY-MM-DD` or RFC 3339
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
}

#[derive(Serialize, ToSchema)]
pub struct PetPatchDoc {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub species: Option<String>,
    pub race: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct PetRecordDoc {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    pub race: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    #[serde(rename = "createdById")]
    pub created_by_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct OwnerSummaryDoc { pub id: Uuid, pub name: String, pub phone: String }

#[derive(Serialize, ToSchema)]
pub struct PetDoc {
    #[serde(flatten)]
    pub pet: PetRecordDoc,
    pub owner: OwnerSummaryDoc,
    #[serde(rename = "createdBy")]
    pub created_by: PublicUserDoc,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::owners::create_owner,
        crate::routes::owners::get_owner,
        crate::routes::owners::update_owner,
        crate::routes::owners::delete_owner,
        crate::routes::pets::create_pet,
        crate::routes::pets::list_pets,
        crate::routes::pets::get_pet,
        crate::routes::pets::list_pets_by_owner,
        crate::routes::pets::update_pet,
        crate::routes::pets::delete_pet,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            RegisterRequest,
            LoginRequest,
            UserDoc,
            PublicUserDoc,
            LoginResponseDoc,
            OwnerRequest,
            OwnerPatchDoc,
            OwnerDoc,
            OwnerWithPetsDoc,
            PetRequest,
            PetPatchDoc,
            PetRecordDoc,
            OwnerSummaryDoc,
            PetDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "owner"),
        (name = "pets")
    )
)]
pub struct ApiDoc;
