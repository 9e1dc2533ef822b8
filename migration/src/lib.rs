// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// RBAC参照テーブル
mod m20250801_000001_create_rbac_profiles_table;
mod m20250801_000002_create_role_module_permissions_table;
mod m20250801_000003_create_user_permission_overrides_table;
mod m20250801_000004_create_department_resource_access_table;

// 監査シンク
mod m20250801_000005_create_access_decisions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_rbac_profiles_table::Migration),
            Box::new(m20250801_000002_create_role_module_permissions_table::Migration),
            Box::new(m20250801_000003_create_user_permission_overrides_table::Migration),
            Box::new(m20250801_000004_create_department_resource_access_table::Migration),
            Box::new(m20250801_000005_create_access_decisions_table::Migration),
        ]
    }
}
