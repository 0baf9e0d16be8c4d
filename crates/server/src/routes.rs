use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod owners;
pub mod pets;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok".into() })
}

/// Build the full application router: public auth routes, bearer-protected
/// registry routes and the API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/register", post(auth::register))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    // Each handler below extracts `CurrentUser`, which rejects with 401.
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/owner", post(owners::create_owner))
        .route(
            "/owner/:id",
            get(owners::get_owner).patch(owners::update_owner).delete(owners::delete_owner),
        )
        .route("/pets", get(pets::list_pets).post(pets::create_pet))
        .route("/pets/owner/:owner_id", get(pets::list_pets_by_owner))
        .route(
            "/pets/:id",
            get(pets::get_pet).patch(pets::update_pet).delete(pets::delete_pet),
        );

    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
