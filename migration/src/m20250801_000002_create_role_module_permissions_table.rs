use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleModulePermissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoleModulePermissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoleModulePermissions::Role)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoleModulePermissions::Module)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoleModulePermissions::Permission)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoleModulePermissions::IsAllowed)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoleModulePermissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RoleModulePermissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一 (role, module, permission) の重複行はデータ不整合として弾く
        manager
            .create_index(
                Index::create()
                    .name("idx_role_module_permissions_unique")
                    .table(RoleModulePermissions::Table)
                    .col(RoleModulePermissions::Role)
                    .col(RoleModulePermissions::Module)
                    .col(RoleModulePermissions::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleModulePermissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleModulePermissions {
    Table,
    Id,
    Role,
    Module,
    Permission,
    IsAllowed,
    CreatedAt,
    UpdatedAt,
}
