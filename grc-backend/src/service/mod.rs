// grc-backend/src/service/mod.rs

pub mod decision_sink;
pub mod rbac_service;
