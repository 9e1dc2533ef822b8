// grc-backend/src/utils/permission.rs

//! 権限マージの純粋ロジック
//!
//! プロファイル・オーバーライド・ロールデフォルトの優先順位付けと
//! 有効権限マトリクスの合成をここに集約する。DBアクセスは行わず、
//! 取得済みの行だけを入力に取るため、サービス層から独立して検証できる。

use crate::domain::department_access_model;
use crate::domain::permission::{
    AccessDecision, DecisionSource, PermissionMatrix, DEPARTMENT_ACCESS_KEY,
};
use crate::domain::rbac_profile_model;
use crate::domain::role_permission_model;
use crate::domain::user_override_model;

/// 権限判定の純粋関数群
pub struct PermissionResolver;

impl PermissionResolver {
    /// 単一の (user, module, permission) 判定
    ///
    /// 優先順位:
    /// 1. プロファイル無し・非アクティブ → 拒否（フェイルクローズ）
    /// 2. オーバーライド行があればその値が確定
    /// 3. ロールデフォルト行があればその値
    /// 4. どちらも無ければ拒否
    pub fn decide(
        profile: Option<&rbac_profile_model::Model>,
        override_value: Option<bool>,
        role_default: Option<bool>,
    ) -> AccessDecision {
        let Some(profile) = profile else {
            return AccessDecision::denied_no_profile();
        };
        if !profile.is_active {
            return AccessDecision::denied_no_profile();
        }

        if let Some(allowed) = override_value {
            return AccessDecision {
                allowed,
                source: DecisionSource::Override,
            };
        }

        if let Some(allowed) = role_default {
            return AccessDecision {
                allowed,
                source: DecisionSource::Role,
            };
        }

        AccessDecision {
            allowed: false,
            source: DecisionSource::Default,
        }
    }

    /// 有効権限マトリクスの合成
    ///
    /// ロールデフォルト行をモジュール別に展開し、同一キーのオーバーライド行で
    /// 上書きする。部門リソースフラグは予約キー配下に載せる。
    /// 明示的な行が無い組み合わせはマップに含めない。
    pub fn merge_matrix(
        role_rows: &[role_permission_model::Model],
        override_rows: &[user_override_model::Model],
        department_rows: &[department_access_model::Model],
    ) -> PermissionMatrix {
        let mut matrix = PermissionMatrix::new();

        for row in role_rows {
            matrix
                .entry(row.module.clone())
                .or_default()
                .insert(row.permission.clone(), row.is_allowed);
        }

        // オーバーレイ: 同一 (module, permission) キーはロール由来の値を置き換える
        for row in override_rows {
            matrix
                .entry(row.module.clone())
                .or_default()
                .insert(row.permission.clone(), row.is_allowed);
        }

        for row in department_rows {
            matrix
                .entry(DEPARTMENT_ACCESS_KEY.to_string())
                .or_default()
                .insert(row.resource_type.clone(), row.can_access);
        }

        matrix
    }

    /// 部門アクセス判定
    ///
    /// プロファイルがアクティブで、問い合わせ部門がプロファイルの部門と一致し、
    /// かつその部門に許可行が存在する場合のみ真。いずれかのルックアップが
    /// 外れたら偽（エラーにはしない）。
    pub fn department_allows(
        profile: Option<&rbac_profile_model::Model>,
        department: &str,
        has_allowed_row: bool,
    ) -> bool {
        let Some(profile) = profile else {
            return false;
        };
        if !profile.is_active {
            return false;
        }
        if profile.department != department {
            return false;
        }
        has_allowed_row
    }
}
