// grc-backend/src/repository/mod.rs

pub mod access_decision_repository;
pub mod department_access_repository;
pub mod rbac_profile_repository;
pub mod role_permission_repository;
pub mod user_override_repository;
