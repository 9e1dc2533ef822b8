// grc-backend/src/repository/role_permission_repository.rs

use crate::db::DbPool;
use crate::domain::permission::{Module, PermissionAction};
use crate::domain::role_permission_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;

/// ロール別モジュール権限の読み取り専用リポジトリ
#[derive(Clone)]
pub struct RolePermissionRepository {
    db: DbPool,
}

impl RolePermissionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// (role, module, permission) のデフォルト行を取得
    ///
    /// ユニークインデックスで重複は書き込み時に拒否されるが、レガシーデータに
    /// 備えて updated_at 降順の先頭を取り、判定を決定的に保つ。
    pub async fn find_by_role_module_permission(
        &self,
        role: &str,
        module: Module,
        permission: PermissionAction,
    ) -> AppResult<Option<Model>> {
        let row = Entity::find()
            .filter(Column::Role.eq(role))
            .filter(Column::Module.eq(module.as_str()))
            .filter(Column::Permission.eq(permission.as_str()))
            .order_by_desc(Column::UpdatedAt)
            .one(&self.db)
            .await?;

        Ok(row)
    }

    /// ロールの全デフォルト行を取得（有効権限マトリクス用）
    pub async fn find_all_by_role(&self, role: &str) -> AppResult<Vec<Model>> {
        let rows = Entity::find()
            .filter(Column::Role.eq(role))
            .order_by_asc(Column::Module)
            .order_by_asc(Column::Permission)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
