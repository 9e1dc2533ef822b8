use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RbacProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RbacProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RbacProfiles::Username).string().not_null())
                    .col(ColumnDef::new(RbacProfiles::Role).string().not_null())
                    .col(
                        ColumnDef::new(RbacProfiles::Department)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RbacProfiles::Entity).string().not_null())
                    .col(
                        ColumnDef::new(RbacProfiles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RbacProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RbacProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ロール単位の一覧取得用
        manager
            .create_index(
                Index::create()
                    .name("idx_rbac_profiles_role")
                    .table(RbacProfiles::Table)
                    .col(RbacProfiles::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RbacProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RbacProfiles {
    Table,
    UserId,
    Username,
    Role,
    Department,
    Entity,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
