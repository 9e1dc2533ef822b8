// grc-backend/src/domain/role_permission_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ロール別モジュール権限エンティティ
///
/// (role, module, permission) ごとのデフォルト許可値。
/// (role, module, permission) にはユニークインデックスを張り、
/// 重複行は書き込み時に拒否する。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "role_module_permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,

    pub role: String,

    pub module: String,

    pub permission: String,

    pub is_allowed: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
