use client::flows::{register_and_login, register_pet_with_owner, update_pet_with_owner, PetDraft};
use client::listing;
use client::session::{SessionData, SessionUser};
use client::{ApiClient, ClientError, MemorySessionStore, Session};
use common::pagination::Pagination;
use models::pet::Species;
use server::routes;
use server::ServerState;
use service::auth::domain::RegisterInput;
use service::auth::AuthConfig;
use service::owner::domain::{OwnerInput, OwnerPatch};
use service::pet::domain::PetPatch;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

async fn spawn_server() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = routes::build_router(ServerState::in_memory(AuthConfig::new("client-secret")), CorsLayer::very_permissive());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiClient::new(format!("http://{addr}")).unwrap()
}

fn empty_session() -> Session {
    Session::restore(MemorySessionStore::default()).unwrap()
}

fn registration(email: &str, name: &str) -> RegisterInput {
    RegisterInput { email: email.into(), name: name.into(), password: "Secret1".into() }
}

fn draft(name: &str, breed: &str) -> PetDraft {
    PetDraft { name: name.into(), species: Species::Dog, breed: breed.into(), date_of_birth: "2020-01-01".into() }
}

#[tokio::test]
async fn health_is_public() {
    let api = spawn_server().await;
    assert_eq!(api.health().await.unwrap().status, "ok");
}

#[tokio::test]
async fn register_then_manage_pets() {
    let api = spawn_server().await;
    let mut alice = empty_session();
    let user = register_and_login(&api, &mut alice, registration("alice@example.com", "Alice")).await.unwrap().clone();
    assert_eq!(user.email, "alice@example.com");
    assert!(alice.is_authenticated());
    assert_eq!(api.me(&mut alice).await.unwrap().id, user.id);

    let owner = OwnerInput { name: "Bob".into(), phone: "81982402134".into() };
    let rex = register_pet_with_owner(&api, &mut alice, &owner, draft("Rex", "Mutt")).await.unwrap();
    assert_eq!(rex.owner.name, "Bob");
    assert_eq!(rex.owner.phone, "(81) 98240-2134");
    assert_eq!(rex.created_by.id, user.id);

    let luna = register_pet_with_owner(&api, &mut alice, &owner, draft("Luna", "Beagle")).await.unwrap();
    let by_owner = api.list_pets_by_owner(&mut alice, luna.owner.id).await.unwrap();
    assert_eq!(by_owner.len(), 1);

    let all = api.list_pets(&mut alice).await.unwrap();
    assert_eq!(all.len(), 2);
    let page = listing::browse(&all, "beag", Pagination::default());
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].pet.id, luna.pet.id);

    let patch = PetPatch { name: Some("Rexy".into()), ..Default::default() };
    let renamed = api.update_pet(&mut alice, rex.pet.id, &patch).await.unwrap();
    assert_eq!(renamed.pet.name, "Rexy");

    api.delete_pet(&mut alice, rex.pet.id).await.unwrap();
    let err = api.get_pet(&mut alice, rex.pet.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn other_users_cannot_mutate_pets() {
    let api = spawn_server().await;
    let mut alice = empty_session();
    let mut carol = empty_session();
    register_and_login(&api, &mut alice, registration("alice@example.com", "Alice")).await.unwrap();
    register_and_login(&api, &mut carol, registration("carol@example.com", "Carol")).await.unwrap();

    let owner = OwnerInput { name: "Bob".into(), phone: "3333-4444".into() };
    let rex = register_pet_with_owner(&api, &mut alice, &owner, draft("Rex", "Mutt")).await.unwrap();

    let patch = PetPatch { name: Some("Stolen".into()), ..Default::default() };
    match api.update_pet(&mut carol, rex.pet.id, &patch).await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "You can only update pets that you created");
        }
        other => panic!("expected 403, got {other:?}"),
    }
    let err = api.delete_pet(&mut carol, rex.pet.id).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(carol.is_authenticated());

    assert_eq!(api.get_pet(&mut carol, rex.pet.id).await.unwrap().pet.name, "Rex");
}

#[tokio::test]
async fn edit_form_updates_owner_then_pet() {
    let api = spawn_server().await;
    let mut alice = empty_session();
    let mut carol = empty_session();
    register_and_login(&api, &mut alice, registration("alice@example.com", "Alice")).await.unwrap();
    register_and_login(&api, &mut carol, registration("carol@example.com", "Carol")).await.unwrap();

    let owner = OwnerInput { name: "Bob".into(), phone: "3333-4444".into() };
    let rex = register_pet_with_owner(&api, &mut alice, &owner, draft("Rex", "Mutt")).await.unwrap();

    let owner_patch = OwnerPatch { name: Some("Robert".into()), phone: Some("81982402134".into()) };
    let pet_patch = PetPatch { name: Some("Rexy".into()), date_of_birth: Some("2019-05-01".into()), ..Default::default() };
    let edited = update_pet_with_owner(&api, &mut alice, rex.pet.id, rex.owner.id, &owner_patch, pet_patch).await.unwrap();
    assert_eq!(edited.pet.name, "Rexy");
    assert_eq!(edited.pet.owner_id, rex.owner.id);
    assert_eq!(edited.owner.name, "Robert");
    assert_eq!(edited.owner.phone, "(81) 98240-2134");
    assert_eq!(edited.pet.birth_date.to_string(), "2019-05-01");

    let stolen = PetPatch { name: Some("Stolen".into()), ..Default::default() };
    let err = update_pet_with_owner(&api, &mut carol, rex.pet.id, rex.owner.id, &OwnerPatch::default(), stolen)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(api.get_pet(&mut alice, rex.pet.id).await.unwrap().pet.name, "Rexy");
}

#[tokio::test]
async fn validation_errors_carry_fields() {
    let api = spawn_server().await;
    let err = api.register(&registration("not-an-email", "Al")).await.unwrap_err();
    match err {
        ClientError::Api { status, fields, .. } => {
            assert_eq!(status, 400);
            assert!(!fields.is_empty());
        }
        other => panic!("expected 400, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let api = spawn_server().await;
    let mut session = empty_session();
    api.register(&registration("dave@example.com", "Dave")).await.unwrap();
    let err = session.login(&api, "dave@example.com", "Wrong1").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn rejected_token_clears_session() {
    let api = spawn_server().await;
    let stale = SessionData {
        token: "not-a-jwt".into(),
        user: SessionUser { id: Uuid::new_v4(), email: "ghost@example.com".into(), name: "Ghost".into() },
    };
    let mut session = Session::restore(MemorySessionStore::with(stale)).unwrap();
    assert!(session.is_authenticated());

    let err = api.list_pets(&mut session).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(!session.is_authenticated());

    let err = api.list_pets(&mut session).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
}
