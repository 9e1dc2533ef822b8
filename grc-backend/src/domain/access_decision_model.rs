// grc-backend/src/domain/access_decision_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 権限判定の監査ログエンティティ（追記専用）
///
/// 判定経路とは切り離して書き込まれ、ここへの書き込み失敗が
/// 許可・拒否の結果を変えることはない。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "access_decisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,

    pub user_id: i64,

    #[sea_orm(nullable)]
    pub role: Option<String>,

    pub module: String,

    pub permission: String,

    pub allowed: bool,

    /// 判定根拠: "override" | "role" | "default" | "no_profile"
    pub source: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
