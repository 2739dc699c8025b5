use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Cents, GoalId, Movement, MovementId, MovementKind, SavingsGoal};

use super::{MIGRATION_001_MOVEMENTS, MIGRATION_002_SAVINGS_GOALS};

/// Repository for persisting and querying movements and savings goals.
///
/// The pool is capped at a single connection: every write path serializes at
/// the store boundary, which is all the write coordination the tracker needs.
/// Queries bind every caller-supplied value, the user id included.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_MOVEMENTS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::query(MIGRATION_002_SAVINGS_GOALS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Movement operations
    // ========================

    /// Insert a new movement row.
    pub async fn save_movement(&self, movement: &Movement) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO movements (id, user_id, date, category, concept, amount_cents, kind, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(movement.id.to_string())
        .bind(&movement.user)
        .bind(movement.date.to_string())
        .bind(&movement.category)
        .bind(&movement.concept)
        .bind(movement.amount_cents)
        .bind(movement.kind.as_str())
        .bind(movement.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save movement")?;
        Ok(())
    }

    /// Get a movement by id.
    pub async fn get_movement(&self, id: MovementId) -> Result<Option<Movement>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, date, category, concept, amount_cents, kind, recorded_at
            FROM movements
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch movement")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_movement(&row)?)),
            None => Ok(None),
        }
    }

    /// List one user's movements, oldest date first. Same-day rows keep their
    /// recording order so the display is stable across reads.
    pub async fn list_movements(&self, user: &str) -> Result<Vec<Movement>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, date, category, concept, amount_cents, kind, recorded_at
            FROM movements
            WHERE user_id = ?
            ORDER BY date, recorded_at
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list movements")?;

        rows.iter().map(Self::row_to_movement).collect()
    }

    /// Update every editable field of a movement, matched by id and owner.
    /// Returns false when no row matched (unknown id or wrong owner).
    pub async fn update_movement(&self, movement: &Movement) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE movements
            SET date = ?, category = ?, concept = ?, amount_cents = ?, kind = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(movement.date.to_string())
        .bind(&movement.category)
        .bind(&movement.concept)
        .bind(movement.amount_cents)
        .bind(movement.kind.as_str())
        .bind(movement.id.to_string())
        .bind(&movement.user)
        .execute(&self.pool)
        .await
        .context("Failed to update movement")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a movement owned by the given user.
    /// Returns false when no row matched.
    pub async fn delete_movement(&self, id: MovementId, user: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movements WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user)
            .execute(&self.pool)
            .await
            .context("Failed to delete movement")?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_movement(row: &sqlx::sqlite::SqliteRow) -> Result<Movement> {
        let id_str: String = row.get("id");
        let date_str: String = row.get("date");
        let kind_str: String = row.get("kind");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(Movement {
            id: Uuid::parse_str(&id_str).context("Invalid movement ID")?,
            user: row.get("user_id"),
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").context("Invalid date")?,
            category: row.get("category"),
            concept: row.get("concept"),
            amount_cents: row.get("amount_cents"),
            kind: MovementKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid movement kind: {}", kind_str))?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Savings goal operations
    // ========================

    /// Insert a new savings goal.
    pub async fn save_goal(&self, goal: &SavingsGoal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO savings_goals (id, user_id, name, target_cents, current_cents, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(goal.id.to_string())
        .bind(&goal.user)
        .bind(&goal.name)
        .bind(goal.target_cents)
        .bind(goal.current_cents)
        .bind(goal.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save goal")?;
        Ok(())
    }

    /// Get a savings goal by id.
    pub async fn get_goal(&self, id: GoalId) -> Result<Option<SavingsGoal>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, target_cents, current_cents, created_at
            FROM savings_goals
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch goal")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_goal(&row)?)),
            None => Ok(None),
        }
    }

    /// List one user's savings goals, ordered by name.
    pub async fn list_goals(&self, user: &str) -> Result<Vec<SavingsGoal>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, target_cents, current_cents, created_at
            FROM savings_goals
            WHERE user_id = ?
            ORDER BY name
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list goals")?;

        rows.iter().map(Self::row_to_goal).collect()
    }

    /// Add a delta to a goal's accumulated total in a single row update.
    /// Returns the new total, or None when the goal does not exist.
    pub async fn add_to_goal(&self, id: GoalId, delta: Cents) -> Result<Option<Cents>> {
        let row = sqlx::query(
            r#"
            UPDATE savings_goals
            SET current_cents = current_cents + ?
            WHERE id = ?
            RETURNING current_cents
            "#,
        )
        .bind(delta)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to add to goal")?;

        Ok(row.map(|r| r.get("current_cents")))
    }

    fn row_to_goal(row: &sqlx::sqlite::SqliteRow) -> Result<SavingsGoal> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(SavingsGoal {
            id: Uuid::parse_str(&id_str).context("Invalid goal ID")?,
            user: row.get("user_id"),
            name: row.get("name"),
            target_cents: row.get("target_cents"),
            current_cents: row.get("current_cents"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
