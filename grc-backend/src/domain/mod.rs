// grc-backend/src/domain/mod.rs

pub mod access_decision_model;
pub mod department_access_model;
pub mod permission;
pub mod rbac_profile_model;
pub mod role_permission_model;
pub mod user_override_model;
