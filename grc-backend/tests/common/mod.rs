// tests/common/mod.rs
#![allow(dead_code)]

use axum::{middleware::from_fn, Router};
use chrono::Utc;
use grc_backend::api::handlers::rbac_handler::rbac_router;
use grc_backend::api::AppState;
use grc_backend::domain::{
    department_access_model, rbac_profile_model, role_permission_model, user_override_model,
};
use grc_backend::middleware::identity::identity_middleware;
use grc_backend::repository::access_decision_repository::AccessDecisionRepository;
use grc_backend::repository::department_access_repository::DepartmentAccessRepository;
use grc_backend::repository::rbac_profile_repository::RbacProfileRepository;
use grc_backend::repository::role_permission_repository::RolePermissionRepository;
use grc_backend::repository::user_override_repository::UserOverrideRepository;
use grc_backend::service::decision_sink::NoopDecisionSink;
use grc_backend::service::rbac_service::RbacService;
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Once};
use uuid::Uuid;

// テスト環境の初期化を一度だけ実行
static INIT: Once = Once::new();

/// テスト環境を初期化
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("grc_backend=debug")
            .with_test_writer()
            .try_init();
    });
}

/// モック接続からリゾルバを組み立てる
///
/// 監査シンクは何もしない実装に差し替える（書き込みクエリが
/// モックの結果キューを消費しないように）。
pub fn build_rbac_service(db: &DatabaseConnection) -> Arc<RbacService> {
    Arc::new(RbacService::new(
        Arc::new(RbacProfileRepository::new(db.clone())),
        Arc::new(RolePermissionRepository::new(db.clone())),
        Arc::new(UserOverrideRepository::new(db.clone())),
        Arc::new(DepartmentAccessRepository::new(db.clone())),
        Arc::new(NoopDecisionSink),
    ))
}

/// モック接続から本番同等のルーター構成を組み立てる
pub fn build_app(db: DatabaseConnection) -> Router {
    let app_state = AppState::with_sink(
        db.clone(),
        Arc::new(AccessDecisionRepository::new(db)),
        Arc::new(NoopDecisionSink),
    );

    rbac_router(app_state).layer(from_fn(identity_middleware))
}

// --- フィクスチャ ---

pub fn profile(
    user_id: i64,
    role: &str,
    department: &str,
    is_active: bool,
) -> rbac_profile_model::Model {
    let now = Utc::now();
    rbac_profile_model::Model {
        user_id,
        username: format!("user{}", user_id),
        role: role.to_string(),
        department: department.to_string(),
        entity: "ACME Holdings".to_string(),
        is_active,
        created_at: now,
        updated_at: now,
    }
}

pub fn role_row(
    role: &str,
    module: &str,
    permission: &str,
    is_allowed: bool,
) -> role_permission_model::Model {
    let now = Utc::now();
    role_permission_model::Model {
        id: Uuid::new_v4(),
        role: role.to_string(),
        module: module.to_string(),
        permission: permission.to_string(),
        is_allowed,
        created_at: now,
        updated_at: now,
    }
}

pub fn override_row(
    user_id: i64,
    module: &str,
    permission: &str,
    is_allowed: bool,
) -> user_override_model::Model {
    let now = Utc::now();
    user_override_model::Model {
        id: Uuid::new_v4(),
        user_id,
        module: module.to_string(),
        permission: permission.to_string(),
        is_allowed,
        created_at: now,
        updated_at: now,
    }
}

pub fn department_row(
    department: &str,
    resource_type: &str,
    can_access: bool,
) -> department_access_model::Model {
    let now = Utc::now();
    department_access_model::Model {
        id: Uuid::new_v4(),
        department: department.to_string(),
        resource_type: resource_type.to_string(),
        can_access,
        created_at: now,
        updated_at: now,
    }
}
