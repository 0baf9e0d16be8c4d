use crate::db::{connect_with_config, DatabaseConfig};
use crate::{owner, pet, user, user_credentials};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use anyhow::Result;
use migration::MigratorTrait;
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = DatabaseConfig {
        url: std::env::var("DATABASE_URL").unwrap_or_default(),
        min_connections: 1,
        connect_timeout_secs: 3,
        acquire_timeout_secs: 3,
        ..DatabaseConfig::default()
    };
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn test_user_with_credentials() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("Crud_{}@Example.com", Uuid::new_v4());
    let u = user::create(&db, &email, "Crud User").await?;
    assert_eq!(u.email, email.to_lowercase());

    user_credentials::insert(&db, u.id, "$argon2id$v=19$placeholder".into(), "argon2").await?;
    let creds = user_credentials::find_by_user(&db, u.id).await?;
    assert!(creds.is_some());

    let found = user::find_by_email(&db, &email).await?;
    assert_eq!(found.map(|f| f.id), Some(u.id));

    // credentials cascade with the user
    user::Entity::delete_by_id(u.id).exec(&db).await?;
    assert!(user_credentials::find_by_user(&db, u.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_owner_pet_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let u = user::create(&db, &format!("pets_{}@example.com", Uuid::new_v4()), "Pet Keeper").await?;
    let o = owner::create(&db, "Bob", "81982402134").await?;
    assert_eq!(o.phone, "(81) 98240-2134");

    let p = pet::create(&db, pet::NewPet {
        name: "Rex",
        species: pet::Species::Dog,
        breed: "Mutt",
        birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        owner_id: o.id,
        created_by_id: u.id,
    }).await?;

    let listed = pet::list_by_owner(&db, o.id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].species, pet::Species::Dog);

    let renamed = pet::update(&db, p.clone(), pet::PetChanges { name: Some("Rexy"), ..Default::default() }).await?;
    assert_eq!(renamed.name, "Rexy");
    assert_eq!(renamed.created_by_id, u.id);

    // RESTRICT: owner with pets cannot be deleted
    assert!(owner::Entity::delete_by_id(o.id).exec(&db).await.is_err());

    renamed.delete(&db).await?;
    owner::Entity::delete_by_id(o.id).exec(&db).await?;
    user::Entity::delete_by_id(u.id).exec(&db).await?;
    Ok(())
}
