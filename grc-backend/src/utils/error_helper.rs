// grc-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! 詳細（誰が・どのエンドポイントで・なぜ）はサーバーログにのみ残し、
//! クライアントへ返る `AppError` には汎用メッセージだけを載せる。

use crate::error::AppError;
use tracing::warn;

/// 認証エラーをログ付きで生成
///
/// `detail` はログ専用。クライアントには `user_message` のみ返す。
pub fn unauthorized_error(detail: &str, context: &str, user_message: &str) -> AppError {
    warn!(
        context = %context,
        detail = %detail,
        "Unauthorized access attempt"
    );
    AppError::Unauthorized(user_message.to_string())
}

/// 認可エラーをログ付きで生成
///
/// ロール名や権限内部をクライアントへ漏らさないため、本文は汎用文言に固定する。
pub fn forbidden_error(detail: &str, context: &str, user_message: &str) -> AppError {
    warn!(
        context = %context,
        detail = %detail,
        "Forbidden access attempt"
    );
    AppError::Forbidden(user_message.to_string())
}

/// 不正入力エラーをログ付きで生成
pub fn bad_request_error(detail: &str, context: &str, user_message: &str) -> AppError {
    warn!(
        context = %context,
        detail = %detail,
        "Malformed request input"
    );
    AppError::BadRequest(user_message.to_string())
}
