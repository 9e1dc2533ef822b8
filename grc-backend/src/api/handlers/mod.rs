// grc-backend/src/api/handlers/mod.rs

pub mod rbac_handler;
