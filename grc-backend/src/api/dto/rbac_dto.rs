// grc-backend/src/api/dto/rbac_dto.rs

use crate::domain::access_decision_model;
use crate::domain::permission::PermissionMatrix;
use crate::domain::rbac_profile_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

/// 権限チェックリクエスト
///
/// `user_id` を省略した場合は呼び出し元の識別子で判定する。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckPermissionRequest {
    #[validate(length(min = 1, message = "Module is required"))]
    pub module: String,

    #[validate(length(min = 1, message = "Permission is required"))]
    pub permission: String,

    pub user_id: Option<i64>,
}

// --- Response DTOs ---

/// 権限チェック結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
    pub user_id: i64,
    pub module: String,
    pub permission: String,
    pub allowed: bool,
}

/// 有効権限マトリクス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectivePermissionsResponse {
    pub user_id: i64,
    pub permissions: PermissionMatrix,
}

/// ロール・部門サマリ
///
/// プロファイルが無いこともデータであり、404ではなく `role: null` で返す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummaryResponse {
    pub user_id: i64,
    pub role: Option<String>,
    pub department: Option<String>,
    pub entity: Option<String>,
    pub is_active: bool,
}

impl RoleSummaryResponse {
    pub fn from_profile(user_id: i64, profile: Option<rbac_profile_model::Model>) -> Self {
        match profile {
            Some(p) => Self {
                user_id,
                role: Some(p.role),
                department: Some(p.department),
                entity: Some(p.entity),
                is_active: p.is_active,
            },
            None => Self {
                user_id,
                role: None,
                department: None,
                entity: None,
                is_active: false,
            },
        }
    }
}

/// 部門アクセス判定結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentAccessResponse {
    pub user_id: i64,
    pub department: String,
    pub can_access: bool,
}

/// 監査ログ1件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDecisionResponse {
    pub id: Uuid,
    pub user_id: i64,
    pub role: Option<String>,
    pub module: String,
    pub permission: String,
    pub allowed: bool,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl From<access_decision_model::Model> for AccessDecisionResponse {
    fn from(model: access_decision_model::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            role: model.role,
            module: model.module,
            permission: model.permission,
            allowed: model.allowed,
            source: model.source,
            created_at: model.created_at,
        }
    }
}
