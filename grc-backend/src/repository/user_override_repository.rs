// grc-backend/src/repository/user_override_repository.rs

use crate::db::DbPool;
use crate::domain::permission::{Module, PermissionAction};
use crate::domain::user_override_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;

/// ユーザー個別権限オーバーライドの読み取り専用リポジトリ
#[derive(Clone)]
pub struct UserOverrideRepository {
    db: DbPool,
}

impl UserOverrideRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// (user_id, module, permission) のオーバーライド行を取得
    pub async fn find_by_user_module_permission(
        &self,
        user_id: i64,
        module: Module,
        permission: PermissionAction,
    ) -> AppResult<Option<Model>> {
        let row = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Module.eq(module.as_str()))
            .filter(Column::Permission.eq(permission.as_str()))
            .order_by_desc(Column::UpdatedAt)
            .one(&self.db)
            .await?;

        Ok(row)
    }

    /// ユーザーの全オーバーライド行を取得（有効権限マトリクス用）
    pub async fn find_all_by_user(&self, user_id: i64) -> AppResult<Vec<Model>> {
        let rows = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Module)
            .order_by_asc(Column::Permission)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
