// grc-backend/src/domain/rbac_profile_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// ユーザーRBACプロファイルエンティティ
///
/// ユーザーごとに1件。ロール・部門・エンティティとアクティブフラグを保持し、
/// 全ての権限判定の起点となる。管理者操作でのみ変更される参照データ。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rbac_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    pub username: String,

    /// ロール名（文字列参照。ロール自体は独立エンティティではない）
    pub role: String,

    pub department: String,

    pub entity: String,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
