// grc-backend/src/repository/department_access_repository.rs

use crate::db::DbPool;
use crate::domain::department_access_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;

/// 部門リソースアクセスの読み取り専用リポジトリ
#[derive(Clone)]
pub struct DepartmentAccessRepository {
    db: DbPool,
}

impl DepartmentAccessRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 部門に許可行が1件でも存在するか
    pub async fn exists_allowed_for_department(&self, department: &str) -> AppResult<bool> {
        let row = Entity::find()
            .filter(Column::Department.eq(department))
            .filter(Column::CanAccess.eq(true))
            .one(&self.db)
            .await?;

        Ok(row.is_some())
    }

    /// 部門の全リソースアクセス行を取得（有効権限マトリクス用）
    pub async fn find_all_by_department(&self, department: &str) -> AppResult<Vec<Model>> {
        let rows = Entity::find()
            .filter(Column::Department.eq(department))
            .order_by_asc(Column::ResourceType)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
