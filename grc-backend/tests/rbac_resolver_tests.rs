// tests/rbac_resolver_tests.rs

mod common;

use common::*;
use grc_backend::domain::permission::{Module, PermissionAction};
use grc_backend::domain::{rbac_profile_model, role_permission_model, user_override_model};
use grc_backend::error::AppError;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

#[tokio::test]
async fn test_role_default_decides_without_override() {
    init_test_env();

    // Auditor は audit.view を許可、audit.approve を拒否
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(42, "Auditor", "Finance", true)]])
        .append_query_results([Vec::<user_override_model::Model>::new()])
        .append_query_results([vec![role_row("Auditor", "audit", "view", true)]])
        .append_query_results([vec![profile(42, "Auditor", "Finance", true)]])
        .append_query_results([Vec::<user_override_model::Model>::new()])
        .append_query_results([vec![role_row("Auditor", "audit", "approve", false)]])
        .into_connection();
    let service = build_rbac_service(&db);

    let view = service
        .resolve(42, Module::Audit, PermissionAction::View)
        .await
        .unwrap();
    assert!(view);

    let approve = service
        .resolve(42, Module::Audit, PermissionAction::Approve)
        .await
        .unwrap();
    assert!(!approve);
}

#[tokio::test]
async fn test_override_wins_over_role_default() {
    init_test_env();

    // ロールデフォルトが拒否でも、個別オーバーライドの許可が勝つ。
    // オーバーライドが確定した場合はロール行を引かないため、
    // ロール行の結果は積んでいない（引けばテストは失敗する）。
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(42, "Auditor", "Finance", true)]])
        .append_query_results([vec![override_row(42, "audit", "approve", true)]])
        .into_connection();
    let service = build_rbac_service(&db);

    let approve = service
        .resolve(42, Module::Audit, PermissionAction::Approve)
        .await
        .unwrap();
    assert!(approve);
}

#[tokio::test]
async fn test_revoking_override_wins_over_allowing_role_default() {
    init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(42, "Auditor", "Finance", true)]])
        .append_query_results([vec![override_row(42, "audit", "view", false)]])
        .into_connection();
    let service = build_rbac_service(&db);

    let view = service
        .resolve(42, Module::Audit, PermissionAction::View)
        .await
        .unwrap();
    assert!(!view);
}

#[tokio::test]
async fn test_missing_profile_denies_everything() {
    init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<rbac_profile_model::Model>::new()])
        .append_query_results([Vec::<rbac_profile_model::Model>::new()])
        .into_connection();
    let service = build_rbac_service(&db);

    let create = service
        .resolve(99, Module::Incident, PermissionAction::Create)
        .await
        .unwrap();
    assert!(!create);

    let matrix = service.effective_permissions(99).await.unwrap();
    assert!(matrix.is_empty());
}

#[tokio::test]
async fn test_inactive_profile_denies_everything() {
    init_test_env();

    // 非アクティブならオーバーライド・ロール行は一切引かない
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(42, "Admin", "Finance", false)]])
        .append_query_results([vec![profile(42, "Admin", "Finance", false)]])
        .into_connection();
    let service = build_rbac_service(&db);

    let view = service
        .resolve(42, Module::Audit, PermissionAction::View)
        .await
        .unwrap();
    assert!(!view);

    let matrix = service.effective_permissions(42).await.unwrap();
    assert!(matrix.is_empty());
}

#[tokio::test]
async fn test_no_row_anywhere_denies_by_default() {
    init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(42, "Viewer", "Finance", true)]])
        .append_query_results([Vec::<user_override_model::Model>::new()])
        .append_query_results([Vec::<role_permission_model::Model>::new()])
        .into_connection();
    let service = build_rbac_service(&db);

    let delete = service
        .resolve(42, Module::Risk, PermissionAction::Delete)
        .await
        .unwrap();
    assert!(!delete);
}

#[tokio::test]
async fn test_store_failure_propagates_as_error() {
    init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection refused".to_string())])
        .into_connection();
    let service = build_rbac_service(&db);

    let result = service
        .resolve(42, Module::Audit, PermissionAction::View)
        .await;
    assert!(matches!(result, Err(AppError::DbErr(_))));
}

#[tokio::test]
async fn test_effective_permissions_overlays_overrides_and_department() {
    init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(42, "Auditor", "Finance", true)]])
        .append_query_results([vec![
            role_row("Auditor", "audit", "view", true),
            role_row("Auditor", "audit", "approve", false),
            role_row("Auditor", "risk", "view", true),
        ]])
        .append_query_results([vec![override_row(42, "audit", "approve", true)]])
        .append_query_results([vec![
            department_row("Finance", "reports", true),
            department_row("Finance", "contracts", false),
        ]])
        .into_connection();
    let service = build_rbac_service(&db);

    let matrix = service.effective_permissions(42).await.unwrap();

    assert!(matrix["audit"]["view"]);
    // オーバーライドがロールデフォルトを上書きする
    assert!(matrix["audit"]["approve"]);
    assert!(matrix["risk"]["view"]);
    // 部門リソースは予約キー配下に載る
    assert!(matrix["department"]["reports"]);
    assert!(!matrix["department"]["contracts"]);
    // 明示的な行の無い組み合わせは含まれない
    assert!(!matrix.contains_key("policy"));
}

#[tokio::test]
async fn test_department_access_requires_matching_department_and_row() {
    init_test_env();

    // Finance 所属のユーザー7: 自部門は許可行があれば真
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(7, "Manager", "Finance", true)]])
        .append_query_results([vec![department_row("Finance", "reports", true)]])
        .append_query_results([vec![profile(7, "Manager", "Finance", true)]])
        .into_connection();
    let service = build_rbac_service(&db);

    let finance = service.has_department_access(7, "Finance").await.unwrap();
    assert!(finance);

    // 他部門の問い合わせはプロファイル部門と一致せず、行を引かずに偽
    let legal = service.has_department_access(7, "Legal").await.unwrap();
    assert!(!legal);
}

#[tokio::test]
async fn test_department_access_denied_for_inactive_profile() {
    init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(7, "Manager", "Finance", false)]])
        .into_connection();
    let service = build_rbac_service(&db);

    let finance = service.has_department_access(7, "Finance").await.unwrap();
    assert!(!finance);
}
