// grc-backend/src/middleware/mod.rs

pub mod authorization;
pub mod identity;
