use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Photos {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    UserId,
    Description,
    Filename,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Photos::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Photos::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Photos::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(
                    ColumnDef::new(Photos::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(ColumnDef::new(Photos::UserId).integer().not_null())
                .col(ColumnDef::new(Photos::Description).string().null())
                .col(ColumnDef::new(Photos::Filename).string().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_photos_user_id")
                        .from(Photos::Table, Photos::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        // the user page lists photos newest-first
        m.create_index(
            Index::create()
                .name("idx_photos_user_id_created_at")
                .table(Photos::Table)
                .col(Photos::UserId)
                .col(Photos::CreatedAt)
                .to_owned(),
        )
        .await
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Photos::Table).to_owned())
            .await
    }
}
