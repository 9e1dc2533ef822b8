// grc-backend/src/api/handlers/rbac_handler.rs

use crate::api::dto::rbac_dto::*;
use crate::api::AppState;
use crate::domain::permission::{Module, PermissionAction};
use crate::error::{AppError, AppResult};
use crate::middleware::identity::{CurrentUser, RequestIdentity};
use crate::require_permission;
use crate::types::ApiResponse;
use crate::utils::error_helper::bad_request_error;
use axum::{
    extract::{Extension, Json, Path, State},
    routing::{get, post},
    Router,
};
use tracing::{info, warn};
use validator::Validate;

// --- Permission Resolution Endpoints ---

/// 呼び出し元の有効権限マトリクスを取得
pub async fn get_my_permissions_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<EffectivePermissionsResponse>>> {
    let permissions = app_state.rbac_service.effective_permissions(user.0).await?;

    Ok(Json(ApiResponse::success(EffectivePermissionsResponse {
        user_id: user.0,
        permissions,
    })))
}

/// 呼び出し元のロール・部門サマリを取得
///
/// プロファイル無しは404ではなく `role: null` の成功ペイロード。
pub async fn get_my_role_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<RoleSummaryResponse>>> {
    let profile = app_state.rbac_service.get_profile(user.0).await?;

    Ok(Json(ApiResponse::success(RoleSummaryResponse::from_profile(
        user.0, profile,
    ))))
}

/// 単一の (module, permission) を判定
///
/// 意図的に公開のままのエンドポイント。`user_id` を明示すれば任意ユーザーの
/// 判定を問い合わせられる（判定の読み取りであって強制ではない）。
pub async fn check_permission_handler(
    State(app_state): State<AppState>,
    identity: Option<Extension<RequestIdentity>>,
    Json(payload): Json<CheckPermissionRequest>,
) -> AppResult<Json<ApiResponse<PermissionCheckResponse>>> {
    // バリデーション
    payload.validate().map_err(|validation_errors| {
        warn!("Permission check validation failed: {}", validation_errors);
        let errors: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        AppError::ValidationErrors(errors)
    })?;

    // 未知のモジュール・アクション名は許可・拒否以前の整形エラー（400）
    let module = Module::from_str(&payload.module).ok_or_else(|| {
        bad_request_error(
            &format!("unknown module: {:?}", payload.module),
            "rbac_handler::check_permission",
            "Unknown module",
        )
    })?;
    let permission = PermissionAction::from_str(&payload.permission).ok_or_else(|| {
        bad_request_error(
            &format!("unknown permission: {:?}", payload.permission),
            "rbac_handler::check_permission",
            "Unknown permission",
        )
    })?;

    let caller = identity.and_then(|Extension(RequestIdentity(id))| id);
    let user_id = payload.user_id.or(caller).ok_or_else(|| {
        bad_request_error(
            "no user_id in body and no caller identity",
            "rbac_handler::check_permission",
            "User id is required",
        )
    })?;

    let allowed = app_state
        .rbac_service
        .resolve(user_id, module, permission)
        .await?;

    info!(
        user_id = user_id,
        module = %module,
        permission = %permission,
        allowed = allowed,
        "Permission check completed"
    );

    Ok(Json(ApiResponse::success(PermissionCheckResponse {
        user_id,
        module: module.as_str().to_string(),
        permission: permission.as_str().to_string(),
        allowed,
    })))
}

/// 呼び出し元の部門アクセスを判定
pub async fn get_department_access_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(department): Path<String>,
) -> AppResult<Json<ApiResponse<DepartmentAccessResponse>>> {
    let can_access = app_state
        .rbac_service
        .has_department_access(user.0, &department)
        .await?;

    Ok(Json(ApiResponse::success(DepartmentAccessResponse {
        user_id: user.0,
        department,
        can_access,
    })))
}

// --- Audit Endpoints ---

/// 直近の権限判定ログを取得（要 audit.view）
pub async fn list_decisions_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<AccessDecisionResponse>>>> {
    let decisions = app_state
        .access_decision_repository
        .find_recent(100)
        .await?;

    Ok(Json(ApiResponse::success(
        decisions.into_iter().map(Into::into).collect(),
    )))
}

// --- Health Check ---

/// ヘルスチェック（公開）
pub async fn health_check_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy"
    })))
}

// --- Router ---

pub fn rbac_router(app_state: AppState) -> Router {
    // 監査ログの閲覧のみゲートで保護する
    let audit_routes = Router::new()
        .route("/rbac/decisions", get(list_decisions_handler))
        .route_layer(require_permission!(
            app_state.rbac_service.clone(),
            Module::Audit,
            PermissionAction::View
        ));

    Router::new()
        // 権限解決エンドポイント
        .route("/rbac/me/permissions", get(get_my_permissions_handler))
        .route("/rbac/me/role", get(get_my_role_handler))
        .route("/rbac/check", post(check_permission_handler))
        .route(
            "/rbac/departments/{department}/access",
            get(get_department_access_handler),
        )
        .merge(audit_routes)
        // ヘルスチェック
        .route("/health", get(health_check_handler))
        .with_state(app_state)
}
