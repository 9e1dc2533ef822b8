// grc-backend/src/repository/access_decision_repository.rs

use crate::db::DbPool;
use crate::domain::access_decision_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;

/// 権限判定監査ログのリポジトリ（追記と参照のみ）
#[derive(Clone)]
pub struct AccessDecisionRepository {
    db: DbPool,
}

impl AccessDecisionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 判定レコードを追記
    pub async fn create(&self, entry: &Model) -> AppResult<Model> {
        let active_model = ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id),
            role: Set(entry.role.clone()),
            module: Set(entry.module.clone()),
            permission: Set(entry.permission.clone()),
            allowed: Set(entry.allowed),
            source: Set(entry.source.clone()),
            created_at: Set(entry.created_at),
        };

        let result = active_model.insert(&self.db).await?;
        Ok(result)
    }

    /// 直近の判定レコードを取得（監査ビュー用）
    pub async fn find_recent(&self, limit: u64) -> AppResult<Vec<Model>> {
        let rows = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
