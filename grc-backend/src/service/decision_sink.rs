// grc-backend/src/service/decision_sink.rs

//! 権限判定の監査シンク
//!
//! 判定経路からはファイア・アンド・フォーゲットで呼ばれる。ここでの失敗が
//! 許可・拒否の結果に影響することはなく、エラーはログに落として握りつぶす。

use crate::domain::access_decision_model;
use crate::domain::permission::{DecisionSource, Module, PermissionAction};
use crate::repository::access_decision_repository::AccessDecisionRepository;
use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

/// 1件の判定イベント
#[derive(Debug, Clone)]
pub struct AccessDecisionEntry {
    pub user_id: i64,
    pub role: Option<String>,
    pub module: Module,
    pub permission: PermissionAction,
    pub allowed: bool,
    pub source: DecisionSource,
}

/// 判定イベントの書き込み先
///
/// 具象ライターではなくこのトレイトに依存させることで、テストでは
/// 何もしない実装に差し替えられる。
#[async_trait]
pub trait AccessDecisionSink: Send + Sync {
    /// 判定イベントを記録する。失敗しても呼び出し元へ伝播させないこと。
    async fn record(&self, entry: AccessDecisionEntry);
}

/// access_decisions テーブルへ書き込むシンク
pub struct DbDecisionSink {
    repository: AccessDecisionRepository,
}

impl DbDecisionSink {
    pub fn new(repository: AccessDecisionRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl AccessDecisionSink for DbDecisionSink {
    async fn record(&self, entry: AccessDecisionEntry) {
        let model = access_decision_model::Model {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            role: entry.role,
            module: entry.module.as_str().to_string(),
            permission: entry.permission.as_str().to_string(),
            allowed: entry.allowed,
            source: entry.source.as_str().to_string(),
            created_at: Utc::now(),
        };

        // 書き込み失敗は判定結果に影響させない
        if let Err(e) = self.repository.create(&model).await {
            warn!(error = %e, "Failed to record access decision");
        }
    }
}

/// 何も書かないシンク（テスト用）
pub struct NoopDecisionSink;

#[async_trait]
impl AccessDecisionSink for NoopDecisionSink {
    async fn record(&self, _entry: AccessDecisionEntry) {}
}
