//! Create `app` table holding client applications and their signing secrets.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(App::Table)
                    .if_not_exists()
                    .col(integer(App::Id).primary_key())
                    .col(string_len(App::Name, 128).unique_key().not_null())
                    .col(string(App::Secret).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(App::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum App { Table, Id, Name, Secret }
