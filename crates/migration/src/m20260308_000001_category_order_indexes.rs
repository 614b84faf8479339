use sea_orm_migration::prelude::*;

use crate::m20260301_000001_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx-categories-order")
                    .table(Categories::Table)
                    .col(Categories::Order)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-is_blog")
                    .table(Categories::Table)
                    .col(Categories::IsBlog)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-categories-is_blog")
                    .table(Categories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-categories-order")
                    .table(Categories::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
