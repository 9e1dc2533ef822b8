use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessDecisions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessDecisions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccessDecisions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    // プロファイル未登録ユーザーの判定も記録するため nullable
                    .col(ColumnDef::new(AccessDecisions::Role).string())
                    .col(ColumnDef::new(AccessDecisions::Module).string().not_null())
                    .col(
                        ColumnDef::new(AccessDecisions::Permission)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccessDecisions::Allowed)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccessDecisions::Source).string().not_null())
                    .col(
                        ColumnDef::new(AccessDecisions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 監査ビューはユーザー・時刻で引く
        manager
            .create_index(
                Index::create()
                    .name("idx_access_decisions_user_created")
                    .table(AccessDecisions::Table)
                    .col(AccessDecisions::UserId)
                    .col(AccessDecisions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessDecisions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AccessDecisions {
    Table,
    Id,
    UserId,
    Role,
    Module,
    Permission,
    Allowed,
    Source,
    CreatedAt,
}
