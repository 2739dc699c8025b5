use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type MovementId = Uuid;

/// The three directions money can move in the household ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Money spent
    Expense,
    /// Money earned
    Income,
    /// Money put into an investment vehicle
    Investment,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Expense => "expense",
            MovementKind::Income => "income",
            MovementKind::Investment => "investment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" => Some(MovementKind::Expense),
            "income" => Some(MovementKind::Income),
            "investment" => Some(MovementKind::Investment),
            _ => None,
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry: one financial movement owned by one user.
/// Insertion order carries no meaning; `date` drives chronological ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    /// Owning user identifier
    pub user: String,
    /// Calendar date the movement belongs to
    pub date: NaiveDate,
    /// Category label from the owner's configured list
    pub category: String,
    /// Free-text note
    pub concept: Option<String>,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    pub kind: MovementKind,
    /// When the row was recorded; breaks ordering ties between same-day rows
    pub recorded_at: DateTime<Utc>,
}

impl Movement {
    pub fn new(
        user: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
        amount_cents: Cents,
        kind: MovementKind,
    ) -> Self {
        assert!(amount_cents >= 0, "Movement amount cannot be negative");
        Self {
            id: Uuid::new_v4(),
            user: user.into(),
            date,
            category: category.into(),
            concept: None,
            amount_cents,
            kind,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }
}

/// One row of an edit-grid batch. A draft with an `id` updates the matching
/// row in place; a draft without one becomes a fresh insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementDraft {
    pub id: Option<MovementId>,
    pub date: NaiveDate,
    pub category: String,
    pub concept: Option<String>,
    pub amount_cents: Cents,
    pub kind: MovementKind,
}
