use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type GoalId = Uuid;

/// A savings goal ("piggy bank"): a named target with accumulated progress.
/// Deposits are additive only; the stored total may exceed the target and is
/// never clamped — only the display ratio is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,
    /// Owning user identifier
    pub user: String,
    pub name: String,
    /// Target amount in cents (always positive)
    pub target_cents: Cents,
    /// Accumulated amount in cents (never negative, may exceed target)
    pub current_cents: Cents,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(user: impl Into<String>, name: impl Into<String>, target_cents: Cents) -> Self {
        assert!(target_cents > 0, "Goal target must be positive");
        Self {
            id: Uuid::new_v4(),
            user: user.into(),
            name: name.into(),
            target_cents,
            current_cents: 0,
            created_at: Utc::now(),
        }
    }

    /// Completion is re-derived from the stored totals; no flag is persisted.
    pub fn is_complete(&self) -> bool {
        self.current_cents >= self.target_cents
    }
}
