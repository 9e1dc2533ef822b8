// grc-backend/src/middleware/authorization.rs

//! 統一権限チェックミドルウェア
//!
//! エンドポイントごとに固定の (module, permission) を宣言し、ビジネスロジックの
//! 手前でリゾルバの判定を適用する。ゲート自体は状態を持たず、書き込みも行わない。

use crate::domain::permission::{Module, PermissionAction};
use crate::middleware::identity::RequestIdentity;
use crate::service::rbac_service::RbacService;
use crate::utils::error_helper::{forbidden_error, unauthorized_error};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// エンドポイント単位のゲート設定
#[derive(Clone)]
pub struct PermissionGate {
    pub rbac_service: Arc<RbacService>,
    pub module: Module,
    pub permission: PermissionAction,
    /// 明示的に公開と宣言されたエンドポイントはゲートを素通しする。
    /// 公開・保護の区別は暗黙ではなく、ルートごとのフラグで宣言する。
    pub public: bool,
}

impl PermissionGate {
    pub fn new(
        rbac_service: Arc<RbacService>,
        module: Module,
        permission: PermissionAction,
    ) -> Self {
        Self {
            rbac_service,
            module,
            permission,
            public: false,
        }
    }

    /// 公開エンドポイント用の設定
    pub fn open(rbac_service: Arc<RbacService>, module: Module, permission: PermissionAction) -> Self {
        Self {
            rbac_service,
            module,
            permission,
            public: true,
        }
    }
}

/// 権限チェックミドルウェアマクロ
#[macro_export]
macro_rules! require_permission {
    ($rbac_service:expr, $module:expr, $permission:expr) => {{
        use axum::middleware::from_fn_with_state;
        use $crate::middleware::authorization::{check_permission_with_state, PermissionGate};

        let gate = PermissionGate::new($rbac_service, $module, $permission);
        from_fn_with_state(gate, check_permission_with_state)
    }};
}

/// 状態を持つ権限チェックミドルウェア関数
pub async fn check_permission_with_state(
    State(gate): State<PermissionGate>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    check_permission(gate, req, next).await
}

/// 権限チェック本体
///
/// 401（識別不能）と403（権限不足）の本文は汎用文言のみ。判定の内訳は
/// サーバーログと監査シンクにだけ残る。
pub async fn check_permission(
    gate: PermissionGate,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // 公開エンドポイントはリゾルバにも問い合わせない
    if gate.public {
        return Ok(next.run(req).await);
    }

    let user_id = match req.extensions().get::<RequestIdentity>() {
        Some(RequestIdentity(Some(user_id))) => *user_id,
        _ => {
            return Err(unauthorized_error(
                "no user identity on request",
                "authorization::check_permission",
                "Authentication required",
            )
            .into_response());
        }
    };

    // ストア到達不能はここで500になり、ハンドラへは到達しない（フェイルクローズ）
    let allowed = match gate
        .rbac_service
        .resolve(user_id, gate.module, gate.permission)
        .await
    {
        Ok(allowed) => allowed,
        Err(e) => return Err(e.into_response()),
    };

    if !allowed {
        return Err(forbidden_error(
            &format!(
                "user {} lacks {}.{}",
                user_id, gate.module, gate.permission
            ),
            "authorization::check_permission",
            "Access denied",
        )
        .into_response());
    }

    // 権限情報を拡張として追加
    req.extensions_mut().insert(PermissionContext {
        user_id,
        module: gate.module,
        permission: gate.permission,
    });

    Ok(next.run(req).await)
}

/// 権限コンテキスト（ミドルウェア通過後に利用可能）
#[derive(Clone, Copy, Debug)]
pub struct PermissionContext {
    pub user_id: i64,
    pub module: Module,
    pub permission: PermissionAction,
}
