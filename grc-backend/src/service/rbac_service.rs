// grc-backend/src/service/rbac_service.rs

use crate::domain::permission::{Module, PermissionAction, PermissionMatrix};
use crate::domain::rbac_profile_model;
use crate::error::AppResult;
use crate::repository::department_access_repository::DepartmentAccessRepository;
use crate::repository::rbac_profile_repository::RbacProfileRepository;
use crate::repository::role_permission_repository::RolePermissionRepository;
use crate::repository::user_override_repository::UserOverrideRepository;
use crate::service::decision_sink::{AccessDecisionEntry, AccessDecisionSink};
use crate::utils::permission::PermissionResolver;
use std::sync::Arc;
use tracing::info;

/// RBACリゾルバ
///
/// ステートレスで、全ての永続状態はPermission Store（RDB）側にある。
/// プロセス内キャッシュは持たない: 管理者による権限編集は即時反映される。
pub struct RbacService {
    profile_repository: Arc<RbacProfileRepository>,
    role_permission_repository: Arc<RolePermissionRepository>,
    user_override_repository: Arc<UserOverrideRepository>,
    department_access_repository: Arc<DepartmentAccessRepository>,
    decision_sink: Arc<dyn AccessDecisionSink>,
}

impl RbacService {
    pub fn new(
        profile_repository: Arc<RbacProfileRepository>,
        role_permission_repository: Arc<RolePermissionRepository>,
        user_override_repository: Arc<UserOverrideRepository>,
        department_access_repository: Arc<DepartmentAccessRepository>,
        decision_sink: Arc<dyn AccessDecisionSink>,
    ) -> Self {
        Self {
            profile_repository,
            role_permission_repository,
            user_override_repository,
            department_access_repository,
            decision_sink,
        }
    }

    /// (user, module, permission) の有効権限を計算
    ///
    /// ルックアップの空振りはエラーではなくデータであり、常に拒否側へ倒す。
    /// ストア到達不能のみ `Err`（呼び出し元で500・フェイルクローズ）。
    pub async fn resolve(
        &self,
        user_id: i64,
        module: Module,
        permission: PermissionAction,
    ) -> AppResult<bool> {
        let profile = self.profile_repository.find_by_user_id(user_id).await?;

        let decision = match &profile {
            Some(p) if p.is_active => {
                let override_value = self
                    .user_override_repository
                    .find_by_user_module_permission(user_id, module, permission)
                    .await?
                    .map(|row| row.is_allowed);

                // オーバーライドが確定したらロールデフォルトは引かない
                let role_default = match override_value {
                    Some(_) => None,
                    None => self
                        .role_permission_repository
                        .find_by_role_module_permission(&p.role, module, permission)
                        .await?
                        .map(|row| row.is_allowed),
                };

                PermissionResolver::decide(profile.as_ref(), override_value, role_default)
            }
            // プロファイル無し・非アクティブはクエリ省略で即拒否
            _ => PermissionResolver::decide(profile.as_ref(), None, None),
        };

        info!(
            user_id = user_id,
            module = %module,
            permission = %permission,
            role = profile.as_ref().map(|p| p.role.as_str()).unwrap_or("-"),
            allowed = decision.allowed,
            source = decision.source.as_str(),
            "RBAC decision"
        );

        // 監査シンクへはファイア・アンド・フォーゲットで記録する
        let entry = AccessDecisionEntry {
            user_id,
            role: profile.map(|p| p.role),
            module,
            permission,
            allowed: decision.allowed,
            source: decision.source,
        };
        let sink = Arc::clone(&self.decision_sink);
        tokio::spawn(async move {
            sink.record(entry).await;
        });

        Ok(decision.allowed)
    }

    /// ユーザーの有効権限マトリクスを計算
    ///
    /// ロールデフォルトにオーバーライドを重ね、部門リソースフラグを
    /// 予約キー配下に載せる。プロファイルが無ければ空マップ（エラーではない）。
    pub async fn effective_permissions(&self, user_id: i64) -> AppResult<PermissionMatrix> {
        let profile = self.profile_repository.find_by_user_id(user_id).await?;

        let Some(profile) = profile else {
            return Ok(PermissionMatrix::new());
        };
        if !profile.is_active {
            return Ok(PermissionMatrix::new());
        }

        let role_rows = self
            .role_permission_repository
            .find_all_by_role(&profile.role)
            .await?;
        let override_rows = self.user_override_repository.find_all_by_user(user_id).await?;
        let department_rows = self
            .department_access_repository
            .find_all_by_department(&profile.department)
            .await?;

        Ok(PermissionResolver::merge_matrix(
            &role_rows,
            &override_rows,
            &department_rows,
        ))
    }

    /// 部門アクセス判定
    ///
    /// プロファイルの部門と問い合わせ部門が一致し、かつ許可行があるときのみ真。
    pub async fn has_department_access(&self, user_id: i64, department: &str) -> AppResult<bool> {
        let profile = self.profile_repository.find_by_user_id(user_id).await?;

        let has_allowed_row = match &profile {
            Some(p) if p.is_active && p.department == department => {
                self.department_access_repository
                    .exists_allowed_for_department(department)
                    .await?
            }
            _ => false,
        };

        Ok(PermissionResolver::department_allows(
            profile.as_ref(),
            department,
            has_allowed_row,
        ))
    }

    /// プロファイルの取得（ロール・部門のサマリ表示用）
    pub async fn get_profile(&self, user_id: i64) -> AppResult<Option<rbac_profile_model::Model>> {
        self.profile_repository.find_by_user_id(user_id).await
    }
}
