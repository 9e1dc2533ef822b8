// grc-backend/src/middleware/identity.rs

//! リクエスト識別子の抽出
//!
//! 優先順位はセッションクッキー、`X-User-Id` ヘッダー、`user_id` クエリの順。
//! クッキー以外のフォールバックはクライアント申告の値であり、なりすまし可能な
//! 弱い信頼境界であることを前提に残している。認証必須エンドポイントでは
//! ゲート側で401に落ちる。
//! 副作用は持たず、値が見つからないことはエラーではない。

use crate::error::{AppError, AppResult};
use crate::utils::error_helper::{bad_request_error, unauthorized_error};
use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

/// セッションクッキー名
pub const SESSION_COOKIE_NAME: &str = "grc_user_id";
/// クライアント申告ヘッダー名
pub const USER_ID_HEADER: &str = "x-user-id";
/// クライアント申告クエリキー
pub const USER_ID_QUERY_KEY: &str = "user_id";

/// リクエストに載せる識別結果
///
/// `None` は「識別できなかった」を表す番兵値。公開エンドポイントでは
/// そのまま通り、認証必須エンドポイントでは401になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIdentity(pub Option<i64>);

/// 識別済みユーザーを要求するエクストラクタ
///
/// 識別できないリクエストは401で弾く。
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestIdentity>() {
            Some(RequestIdentity(Some(user_id))) => Ok(CurrentUser(*user_id)),
            _ => Err(unauthorized_error(
                "no user identity on request",
                "identity::CurrentUser",
                "Authentication required",
            )),
        }
    }
}

/// ユーザーIDの抽出（純粋関数）
///
/// 見つからない場合は `Ok(None)`。値があるのに数値でない場合のみ
/// `MalformedInput` として400を返す。
pub fn extract_user_id(
    headers: &HeaderMap,
    cookie_jar: &CookieJar,
    query: Option<&str>,
) -> AppResult<Option<i64>> {
    if let Some(cookie) = cookie_jar.get(SESSION_COOKIE_NAME) {
        return parse_user_id(cookie.value(), "session cookie").map(Some);
    }

    if let Some(value) = headers.get(USER_ID_HEADER) {
        let raw = value.to_str().map_err(|_| {
            bad_request_error(
                "non-ascii x-user-id header",
                "identity::extract_user_id",
                "Invalid user id",
            )
        })?;
        return parse_user_id(raw, "header").map(Some);
    }

    if let Some(raw) = query.and_then(|q| query_param(q, USER_ID_QUERY_KEY)) {
        return parse_user_id(&raw, "query parameter").map(Some);
    }

    Ok(None)
}

fn parse_user_id(raw: &str, origin: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        bad_request_error(
            &format!("non-numeric user id from {}: {:?}", origin, raw),
            "identity::parse_user_id",
            "Invalid user id",
        )
    })
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}

/// 識別ミドルウェア
///
/// 抽出結果を `RequestIdentity` としてリクエストに載せる。
/// 識別できなくてもここでは弾かない（公開・保護の判断はゲート側）。
pub async fn identity_middleware(
    cookie_jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let query = request.uri().query().map(|q| q.to_string());
    let user_id = extract_user_id(request.headers(), &cookie_jar, query.as_deref())?;

    request.extensions_mut().insert(RequestIdentity(user_id));
    Ok(next.run(request).await)
}
