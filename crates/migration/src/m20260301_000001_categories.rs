use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Categories {
    Table,
    Id,
    ParentId,
    TreeId,
    Lft,
    Rght,
    Level,
    Name,
    Slug,
    Active,
    UnicodeName,
    AlternateTitle,
    AlternateUrl,
    Description,
    MetaKeywords,
    MetaExtra,
    Thumbnail,
    ThumbnailWidth,
    ThumbnailHeight,
    Order,
    IsBlog,
    ShowConverserAd,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::ParentId).blob())
                    .col(ColumnDef::new(Categories::TreeId).integer().not_null())
                    .col(ColumnDef::new(Categories::Lft).integer().not_null())
                    .col(ColumnDef::new(Categories::Rght).integer().not_null())
                    .col(ColumnDef::new(Categories::Level).integer().not_null())
                    .col(ColumnDef::new(Categories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::Slug).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Categories::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Categories::UnicodeName).string_len(255))
                    .col(
                        ColumnDef::new(Categories::AlternateTitle)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Categories::AlternateUrl)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Categories::Description).text())
                    .col(
                        ColumnDef::new(Categories::MetaKeywords)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Categories::MetaExtra)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Categories::Thumbnail).string_len(100))
                    .col(ColumnDef::new(Categories::ThumbnailWidth).integer())
                    .col(ColumnDef::new(Categories::ThumbnailHeight).integer())
                    .col(ColumnDef::new(Categories::Order).integer())
                    .col(
                        ColumnDef::new(Categories::IsBlog)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Categories::ShowConverserAd)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-parent_id")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-parent_id-name-unique")
                    .table(Categories::Table)
                    .col(Categories::ParentId)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-tree_id-slug-unique")
                    .table(Categories::Table)
                    .col(Categories::TreeId)
                    .col(Categories::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx-categories-tree_id", Categories::TreeId),
            ("idx-categories-lft", Categories::Lft),
            ("idx-categories-rght", Categories::Rght),
            ("idx-categories-level", Categories::Level),
            ("idx-categories-slug", Categories::Slug),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Categories::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        Ok(())
    }
}
