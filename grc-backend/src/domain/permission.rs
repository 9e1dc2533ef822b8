// grc-backend/src/domain/permission.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 部門リソースアクセスをマトリクスに載せるときの予約キー
///
/// モジュール権限とは別軸のため、実在モジュール名と衝突しない擬似キーで公開する。
pub const DEPARTMENT_ACCESS_KEY: &str = "department";

/// GRCドメインのモジュール（権限スコープの第一軸）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Incident,
    Audit,
    Risk,
    Policy,
    Compliance,
    Framework,
}

impl Module {
    /// モジュール名を文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Incident => "incident",
            Module::Audit => "audit",
            Module::Risk => "risk",
            Module::Policy => "policy",
            Module::Compliance => "compliance",
            Module::Framework => "framework",
        }
    }

    /// 文字列からモジュールを解析（未知の値はNone）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "incident" => Some(Module::Incident),
            "audit" => Some(Module::Audit),
            "risk" => Some(Module::Risk),
            "policy" => Some(Module::Policy),
            "compliance" => Some(Module::Compliance),
            "framework" => Some(Module::Framework),
            _ => None,
        }
    }

    /// 全モジュールの一覧
    pub fn all() -> &'static [Module] {
        &[
            Module::Incident,
            Module::Audit,
            Module::Risk,
            Module::Policy,
            Module::Compliance,
            Module::Framework,
        ]
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid module name: {}", s))
    }
}

/// モジュール内のアクション（権限スコープの第二軸）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Approve,
    Assign,
    Delete,
    Evaluate,
    Escalate,
    Analytics,
}

impl PermissionAction {
    /// アクション名を文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::View => "view",
            PermissionAction::Create => "create",
            PermissionAction::Edit => "edit",
            PermissionAction::Approve => "approve",
            PermissionAction::Assign => "assign",
            PermissionAction::Delete => "delete",
            PermissionAction::Evaluate => "evaluate",
            PermissionAction::Escalate => "escalate",
            PermissionAction::Analytics => "analytics",
        }
    }

    /// 文字列からアクションを解析（未知の値はNone）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" => Some(PermissionAction::View),
            "create" => Some(PermissionAction::Create),
            "edit" => Some(PermissionAction::Edit),
            "approve" => Some(PermissionAction::Approve),
            "assign" => Some(PermissionAction::Assign),
            "delete" => Some(PermissionAction::Delete),
            "evaluate" => Some(PermissionAction::Evaluate),
            "escalate" => Some(PermissionAction::Escalate),
            "analytics" => Some(PermissionAction::Analytics),
            _ => None,
        }
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PermissionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid permission name: {}", s))
    }
}

/// 有効権限マトリクス: モジュール名 -> アクション名 -> 許可フラグ
///
/// 明示的な行が存在する組み合わせのみ含む。存在しない組み合わせは省略され、
/// 強制判定は常に `RbacService::resolve` が真実のソースとなる。
pub type PermissionMatrix = HashMap<String, HashMap<String, bool>>;

/// 許可判定の根拠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// ユーザー個別オーバーライド行が決定
    Override,
    /// ロールのデフォルト行が決定
    Role,
    /// 行が存在しないためデフォルト拒否
    Default,
    /// プロファイル無しまたは非アクティブ
    NoProfile,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Override => "override",
            DecisionSource::Role => "role",
            DecisionSource::Default => "default",
            DecisionSource::NoProfile => "no_profile",
        }
    }
}

/// 単一の許可判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub source: DecisionSource,
}

impl AccessDecision {
    pub fn denied_no_profile() -> Self {
        Self {
            allowed: false,
            source: DecisionSource::NoProfile,
        }
    }
}
