use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DepartmentResourceAccess::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentResourceAccess::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DepartmentResourceAccess::Department)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentResourceAccess::ResourceType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentResourceAccess::CanAccess)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentResourceAccess::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DepartmentResourceAccess::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_department_resource_access_unique")
                    .table(DepartmentResourceAccess::Table)
                    .col(DepartmentResourceAccess::Department)
                    .col(DepartmentResourceAccess::ResourceType)
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
                    .table(DepartmentResourceAccess::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum DepartmentResourceAccess {
    Table,
    Id,
    Department,
    ResourceType,
    CanAccess,
    CreatedAt,
    UpdatedAt,
}
