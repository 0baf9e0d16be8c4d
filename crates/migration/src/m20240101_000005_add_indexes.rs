use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pet: lookups by owner (listByOwner, owner delete guard)
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_owner")
                    .table(Pet::Table)
                    .col(Pet::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Pet: creator joins
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_created_by")
                    .table(Pet::Table)
                    .col(Pet::CreatedById)
                    .to_owned(),
            )
            .await?;

        // Owner: name search
        manager
            .create_index(
                Index::create()
                    .name("idx_owner_name")
                    .table(Owner::Table)
                    .col(Owner::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_owner_name").table(Owner::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_pet_created_by").table(Pet::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_pet_owner").table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, OwnerId, CreatedById }

#[derive(DeriveIden)]
enum Owner { Table, Name }
