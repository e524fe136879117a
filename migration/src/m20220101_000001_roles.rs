use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
}

#[derive(Iden)]
enum Permissions {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
}

#[derive(Iden)]
enum RolesPermissions {
    Table,
    RoleId,
    PermissionId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Roles::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Roles::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Roles::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(
                    ColumnDef::new(Roles::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(Permissions::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Permissions::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Permissions::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(
                    ColumnDef::new(Permissions::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::cust("CURRENT_TIMESTAMP")),
                )
                .col(
                    ColumnDef::new(Permissions::Name)
                        .string()
                        .not_null()
                        .unique_key(),
                )
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(RolesPermissions::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(RolesPermissions::RoleId)
                        .integer()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(RolesPermissions::PermissionId)
                        .integer()
                        .not_null(),
                )
                .primary_key(
                    Index::create()
                        .col(RolesPermissions::RoleId)
                        .col(RolesPermissions::PermissionId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_roles_permissions_role_id")
                        .from(RolesPermissions::Table, RolesPermissions::RoleId)
                        .to(Roles::Table, Roles::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_roles_permissions_permission_id")
                        .from(RolesPermissions::Table, RolesPermissions::PermissionId)
                        .to(Permissions::Table, Permissions::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(RolesPermissions::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}
