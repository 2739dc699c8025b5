mod repository;

pub use repository::*;

/// SQL migration for the movements table
pub const MIGRATION_001_MOVEMENTS: &str = include_str!("migrations/001_movements.sql");

/// SQL migration for savings goals
pub const MIGRATION_002_SAVINGS_GOALS: &str = include_str!("migrations/002_savings_goals.sql");
