pub mod matches;
pub mod teams;
pub mod tournaments;

/// Applied at startup; every statement is idempotent.
pub const SCHEMA: &str = include_str!("schema.sql");
