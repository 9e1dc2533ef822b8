// grc-backend/src/domain/user_override_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザー個別権限オーバーライドエンティティ
///
/// 同一 (user_id, module, permission) ではロールデフォルトより常に優先される。
/// 個別の付与・剥奪の両方を表現できるよう is_allowed は明示的な真偽値を持つ。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_permission_overrides")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,

    pub user_id: i64,

    pub module: String,

    pub permission: String,

    pub is_allowed: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
