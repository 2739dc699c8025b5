use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cents, Movement, MovementKind, SavingsGoal};

/// Per-kind sums over a movement snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotals {
    pub expense: Cents,
    pub income: Cents,
    pub investment: Cents,
}

impl KindTotals {
    pub fn get(&self, kind: MovementKind) -> Cents {
        match kind {
            MovementKind::Expense => self.expense,
            MovementKind::Income => self.income,
            MovementKind::Investment => self.investment,
        }
    }
}

/// Sum amounts per movement kind.
pub fn totals_by_kind(movements: &[Movement]) -> KindTotals {
    movements.iter().fold(KindTotals::default(), |mut totals, m| {
        match m.kind {
            MovementKind::Expense => totals.expense += m.amount_cents,
            MovementKind::Income => totals.income += m.amount_cents,
            MovementKind::Investment => totals.investment += m.amount_cents,
        }
        totals
    })
}

/// Net balance = income + investment - expense.
pub fn balance(movements: &[Movement]) -> Cents {
    let totals = totals_by_kind(movements);
    totals.income + totals.investment - totals.expense
}

/// Profit within a single category label: income minus expense.
/// Meant for "business" categories where both sides share a label.
pub fn category_profit(movements: &[Movement], category: &str) -> Cents {
    movements
        .iter()
        .filter(|m| m.category == category)
        .map(|m| match m.kind {
            MovementKind::Income => m.amount_cents,
            MovementKind::Expense => -m.amount_cents,
            MovementKind::Investment => 0,
        })
        .sum()
}

/// Progress toward a goal target, clamped to [0, 1] for display.
/// The stored total itself is never clamped.
pub fn savings_ratio(goal: &SavingsGoal) -> f64 {
    (goal.current_cents as f64 / goal.target_cents as f64).clamp(0.0, 1.0)
}

/// Heuristic financial health score in [0, 100].
///
/// savings rate = balance / income (0 when there is no income), then
/// score = clamp(round(rate * multiplier), 0, 100). The default x150
/// multiplier is a rule of thumb, not a financial model; it lives in
/// `config::HealthPolicy` so deployments can swap it.
pub fn health_score(movements: &[Movement], multiplier: f64) -> u8 {
    let totals = totals_by_kind(movements);
    if totals.income <= 0 {
        return 0;
    }
    let rate = balance(movements) as f64 / totals.income as f64;
    (rate * multiplier).round().clamp(0.0, 100.0) as u8
}

/// Expense sums grouped by category, for proportional (pie-style) display.
pub fn expense_breakdown(movements: &[Movement]) -> BTreeMap<String, Cents> {
    let mut breakdown = BTreeMap::new();
    for m in movements.iter().filter(|m| m.kind == MovementKind::Expense) {
        *breakdown.entry(m.category.clone()).or_insert(0) += m.amount_cents;
    }
    breakdown
}

/// Expense sums grouped by calendar date, for calendar/heatmap display.
pub fn daily_expense_intensity(movements: &[Movement]) -> BTreeMap<NaiveDate, Cents> {
    let mut intensity = BTreeMap::new();
    for m in movements.iter().filter(|m| m.kind == MovementKind::Expense) {
        *intensity.entry(m.date).or_insert(0) += m.amount_cents;
    }
    intensity
}
