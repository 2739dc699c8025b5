use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Amount cannot be negative: {0}")]
    InvalidAmount(Cents),

    #[error("Goal target must be positive: {0}")]
    InvalidTarget(Cents),

    #[error("Unknown movement kind: {0}")]
    InvalidKind(String),

    #[error("Category '{category}' is not configured for user '{user}'")]
    UnknownCategory { user: String, category: String },

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Movement not found: {0}")]
    MovementNotFound(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
