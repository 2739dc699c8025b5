use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Cents, KindTotals, SavingsGoal};

/// One goal with its derived display state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: SavingsGoal,
    /// Progress toward the target, clamped to [0, 1]
    pub ratio: f64,
    pub complete: bool,
}

/// Everything a display refresh needs, recomputed from scratch on each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub user: String,
    pub totals: KindTotals,
    pub balance: Cents,
    /// Heuristic score in [0, 100]
    pub health_score: u8,
    /// Expense sums per category, for proportional display
    pub expense_breakdown: BTreeMap<String, Cents>,
    /// Expense sums per calendar date, for calendar/heatmap display
    pub daily_expense: BTreeMap<NaiveDate, Cents>,
    pub goals: Vec<GoalProgress>,
}

/// Result of a goal deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositOutcome {
    /// The goal with its updated total
    pub goal: SavingsGoal,
    /// True exactly when this deposit crossed the target threshold
    pub completed: bool,
}

/// Result of an edit-grid reconciliation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub inserted: usize,
    pub updated: usize,
}
