// grc-backend/src/repository/rbac_profile_repository.rs

use crate::db::DbPool;
use crate::domain::rbac_profile_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;

/// RBACプロファイルの読み取り専用リポジトリ
///
/// リゾルバは参照データを読むだけで、リクエスト経路からの書き込みは行わない。
#[derive(Clone)]
pub struct RbacProfileRepository {
    db: DbPool,
}

impl RbacProfileRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// ユーザーIDでプロファイルを取得
    ///
    /// 非アクティブ判定は純粋ロジック側で行うため、ここではフィルタしない。
    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<Model>> {
        let profile = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(profile)
    }
}
