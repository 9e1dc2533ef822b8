// grc-backend/src/api/dto/mod.rs

pub mod rbac_dto;
