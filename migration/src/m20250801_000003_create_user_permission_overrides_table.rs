use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPermissionOverrides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserPermissionOverrides::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserPermissionOverrides::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserPermissionOverrides::Module)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserPermissionOverrides::Permission)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserPermissionOverrides::IsAllowed)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserPermissionOverrides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserPermissionOverrides::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一 (user_id, module, permission) の重複行はデータ不整合として弾く
        manager
            .create_index(
                Index::create()
                    .name("idx_user_permission_overrides_unique")
                    .table(UserPermissionOverrides::Table)
                    .col(UserPermissionOverrides::UserId)
                    .col(UserPermissionOverrides::Module)
                    .col(UserPermissionOverrides::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UserPermissionOverrides::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum UserPermissionOverrides {
    Table,
    Id,
    UserId,
    Module,
    Permission,
    IsAllowed,
    CreatedAt,
    UpdatedAt,
}
