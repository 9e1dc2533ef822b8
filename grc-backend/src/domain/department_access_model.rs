// grc-backend/src/domain/department_access_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 部門リソースアクセスエンティティ
///
/// モジュール・アクションとは独立した、部門単位の粗粒度ゲート。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "department_resource_access")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,

    pub department: String,

    pub resource_type: String,

    pub can_access: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
