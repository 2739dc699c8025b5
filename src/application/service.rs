use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::{Config, UserProfile};
use crate::domain::{
    self, Cents, GoalId, Movement, MovementDraft, MovementId, MovementKind, SavingsGoal,
};
use crate::storage::Repository;

use super::{AppError, Dashboard, DepositOutcome, GoalProgress, ReconcileOutcome};

/// Application service providing high-level operations for the tracker.
/// This is the primary interface for any client (CLI, UI, API).
///
/// Every display read re-fetches the owner's rows and recomputes aggregates
/// from scratch; nothing is cached or invalidated.
pub struct TrackerService {
    repo: Repository,
    config: Config,
}

impl TrackerService {
    /// Create a new tracker service with the given repository and config.
    pub fn new(repo: Repository, config: Config) -> Self {
        Self { repo, config }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str, config: Config) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo, config))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str, config: Config) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up the profile for a user id.
    pub fn profile(&self, user: &str) -> Result<&UserProfile, AppError> {
        self.config
            .profile(user)
            .ok_or_else(|| AppError::UnknownUser(user.to_string()))
    }

    /// Check a PIN against the profile's configured one by exact string
    /// equality. A profile without a PIN is an open gate. Cosmetic only.
    pub fn verify_pin(&self, user: &str, pin: &str) -> Result<bool, AppError> {
        let profile = self.profile(user)?;
        Ok(match &profile.pin {
            Some(expected) => expected == pin,
            None => true,
        })
    }

    fn validate_movement_fields(
        &self,
        user: &str,
        category: &str,
        amount_cents: Cents,
    ) -> Result<(), AppError> {
        if amount_cents < 0 {
            return Err(AppError::InvalidAmount(amount_cents));
        }
        let profile = self.profile(user)?;
        if !profile.allows_category(category) {
            return Err(AppError::UnknownCategory {
                user: user.to_string(),
                category: category.to_string(),
            });
        }
        Ok(())
    }

    // ========================
    // Movement operations
    // ========================

    /// Record a new movement for a user.
    pub async fn add_movement(
        &self,
        user: &str,
        date: NaiveDate,
        category: &str,
        concept: Option<String>,
        amount_cents: Cents,
        kind: MovementKind,
    ) -> Result<Movement, AppError> {
        self.validate_movement_fields(user, category, amount_cents)?;

        let mut movement = Movement::new(user, date, category, amount_cents, kind);
        if let Some(c) = concept {
            movement = movement.with_concept(c);
        }

        self.repo.save_movement(&movement).await?;
        debug!(user, kind = %kind, "movement recorded");
        Ok(movement)
    }

    /// List a user's movements, oldest date first.
    /// Only rows owned by this user are ever returned.
    pub async fn list_movements(&self, user: &str) -> Result<Vec<Movement>, AppError> {
        Ok(self.repo.list_movements(user).await?)
    }

    /// Edit every field of an existing movement. The row must belong to the
    /// given user; a foreign or unknown id fails with not-found.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_movement(
        &self,
        id: MovementId,
        user: &str,
        date: NaiveDate,
        category: &str,
        concept: Option<String>,
        amount_cents: Cents,
        kind: MovementKind,
    ) -> Result<Movement, AppError> {
        self.validate_movement_fields(user, category, amount_cents)?;

        let movement = Movement {
            id,
            user: user.to_string(),
            date,
            category: category.to_string(),
            concept,
            amount_cents,
            kind,
            recorded_at: Utc::now(), // not persisted by the update
        };

        if !self.repo.update_movement(&movement).await? {
            return Err(AppError::MovementNotFound(id.to_string()));
        }

        // Re-read so the caller sees the stored row, original timestamp included
        self.repo
            .get_movement(id)
            .await?
            .ok_or_else(|| AppError::MovementNotFound(id.to_string()))
    }

    /// Delete a movement owned by the given user.
    pub async fn delete_movement(&self, id: MovementId, user: &str) -> Result<(), AppError> {
        if !self.repo.delete_movement(id, user).await? {
            return Err(AppError::MovementNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Apply an edit-grid batch as an upsert: drafts with an id update the
    /// matching row in place, drafts without one become new rows. The whole
    /// batch is validated before the first write so a bad row rejects the
    /// batch with prior state unchanged.
    pub async fn reconcile_movements(
        &self,
        user: &str,
        drafts: Vec<MovementDraft>,
    ) -> Result<ReconcileOutcome, AppError> {
        for draft in &drafts {
            self.validate_movement_fields(user, &draft.category, draft.amount_cents)?;
            if let Some(id) = draft.id {
                self.repo
                    .get_movement(id)
                    .await?
                    .filter(|m| m.user == user)
                    .ok_or_else(|| AppError::MovementNotFound(id.to_string()))?;
            }
        }

        let mut outcome = ReconcileOutcome {
            inserted: 0,
            updated: 0,
        };

        for draft in drafts {
            match draft.id {
                Some(id) => {
                    let movement = Movement {
                        id,
                        user: user.to_string(),
                        date: draft.date,
                        category: draft.category,
                        concept: draft.concept,
                        amount_cents: draft.amount_cents,
                        kind: draft.kind,
                        recorded_at: Utc::now(),
                    };
                    if !self.repo.update_movement(&movement).await? {
                        return Err(AppError::MovementNotFound(id.to_string()));
                    }
                    outcome.updated += 1;
                }
                None => {
                    let mut movement =
                        Movement::new(user, draft.date, draft.category, draft.amount_cents, draft.kind);
                    movement.concept = draft.concept;
                    self.repo.save_movement(&movement).await?;
                    outcome.inserted += 1;
                }
            }
        }

        info!(
            user,
            inserted = outcome.inserted,
            updated = outcome.updated,
            "grid reconciled"
        );
        Ok(outcome)
    }

    // ========================
    // Savings goal operations
    // ========================

    /// Create a new savings goal with an empty total.
    pub async fn add_goal(
        &self,
        user: &str,
        name: &str,
        target_cents: Cents,
    ) -> Result<SavingsGoal, AppError> {
        if target_cents <= 0 {
            return Err(AppError::InvalidTarget(target_cents));
        }
        self.profile(user)?;

        let goal = SavingsGoal::new(user, name, target_cents);
        self.repo.save_goal(&goal).await?;
        Ok(goal)
    }

    /// List a user's savings goals.
    pub async fn list_goals(&self, user: &str) -> Result<Vec<SavingsGoal>, AppError> {
        Ok(self.repo.list_goals(user).await?)
    }

    /// Add to a goal's total. The amount must be non-negative and is applied
    /// unconditionally; `completed` signals that this deposit crossed the
    /// target threshold. Completion is derived, never stored.
    pub async fn deposit(
        &self,
        goal_id: GoalId,
        amount_cents: Cents,
    ) -> Result<DepositOutcome, AppError> {
        if amount_cents < 0 {
            return Err(AppError::InvalidAmount(amount_cents));
        }

        let mut goal = self
            .repo
            .get_goal(goal_id)
            .await?
            .ok_or_else(|| AppError::GoalNotFound(goal_id.to_string()))?;

        let previous = goal.current_cents;
        let new_total = self
            .repo
            .add_to_goal(goal_id, amount_cents)
            .await?
            .ok_or_else(|| AppError::GoalNotFound(goal_id.to_string()))?;
        goal.current_cents = new_total;

        let completed = previous < goal.target_cents && new_total >= goal.target_cents;
        if completed {
            info!(user = %goal.user, goal = %goal.name, "savings goal reached");
        }

        Ok(DepositOutcome { goal, completed })
    }

    // ========================
    // Aggregate views
    // ========================

    /// Recompute every derived view for a display refresh.
    pub async fn dashboard(&self, user: &str) -> Result<Dashboard, AppError> {
        let movements = self.repo.list_movements(user).await?;
        let goals = self.repo.list_goals(user).await?;

        let goals = goals
            .into_iter()
            .map(|goal| {
                let ratio = domain::savings_ratio(&goal);
                let complete = goal.is_complete();
                GoalProgress {
                    goal,
                    ratio,
                    complete,
                }
            })
            .collect();

        Ok(Dashboard {
            user: user.to_string(),
            totals: domain::totals_by_kind(&movements),
            balance: domain::balance(&movements),
            health_score: domain::health_score(&movements, self.config.health.multiplier),
            expense_breakdown: domain::expense_breakdown(&movements),
            daily_expense: domain::daily_expense_intensity(&movements),
            goals,
        })
    }

    /// Income minus expense within one category label.
    pub async fn category_profit(&self, user: &str, category: &str) -> Result<Cents, AppError> {
        let movements = self.repo.list_movements(user).await?;
        Ok(domain::category_profit(&movements, category))
    }
}
