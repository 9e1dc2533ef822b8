// grc-backend/src/api/mod.rs

use crate::db::DbPool;
use crate::repository::{
    access_decision_repository::AccessDecisionRepository,
    department_access_repository::DepartmentAccessRepository,
    rbac_profile_repository::RbacProfileRepository,
    role_permission_repository::RolePermissionRepository,
    user_override_repository::UserOverrideRepository,
};
use crate::service::decision_sink::{AccessDecisionSink, DbDecisionSink};
use crate::service::rbac_service::RbacService;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub rbac_service: Arc<RbacService>,
    pub access_decision_repository: Arc<AccessDecisionRepository>,
    pub db: DbPool,
}

impl AppState {
    /// DB接続からリポジトリとサービスを組み立てる
    pub fn new(db: DbPool) -> Self {
        let access_decision_repository = Arc::new(AccessDecisionRepository::new(db.clone()));
        let decision_sink = Arc::new(DbDecisionSink::new((*access_decision_repository).clone()));

        Self::with_sink(db, access_decision_repository, decision_sink)
    }

    /// 監査シンクを差し替えて組み立てる（テスト用）
    pub fn with_sink(
        db: DbPool,
        access_decision_repository: Arc<AccessDecisionRepository>,
        decision_sink: Arc<dyn AccessDecisionSink>,
    ) -> Self {
        let rbac_service = Arc::new(RbacService::new(
            Arc::new(RbacProfileRepository::new(db.clone())),
            Arc::new(RolePermissionRepository::new(db.clone())),
            Arc::new(UserOverrideRepository::new(db.clone())),
            Arc::new(DepartmentAccessRepository::new(db.clone())),
            decision_sink,
        ));

        Self {
            rbac_service,
            access_decision_repository,
            db,
        }
    }
}
