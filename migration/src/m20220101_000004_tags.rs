use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
}

#[derive(Iden)]
enum PhotoTags {
    Table,
    PhotoId,
    TagId,
}

#[derive(Iden)]
enum Photos {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Tags::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Tags::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Tags::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(
                    ColumnDef::new(Tags::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(PhotoTags::Table)
                .if_not_exists()
                .col(ColumnDef::new(PhotoTags::PhotoId).integer().not_null())
                .col(ColumnDef::new(PhotoTags::TagId).integer().not_null())
                .primary_key(
                    Index::create()
                        .col(PhotoTags::PhotoId)
                        .col(PhotoTags::TagId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_photo_tags_photo_id")
                        .from(PhotoTags::Table, PhotoTags::PhotoId)
                        .to(Photos::Table, Photos::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_photo_tags_tag_id")
                        .from(PhotoTags::Table, PhotoTags::TagId)
                        .to(Tags::Table, Tags::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(PhotoTags::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(Tags::Table).to_owned())
            .await
    }
}
