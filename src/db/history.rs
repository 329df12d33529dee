use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::calculation::CalculationEntry;

/// Entries per page in the history view.
pub const PAGE_SIZE: u32 = 10;

/// Per-user calculation log. Every query is scoped by `user_id`; there is
/// deliberately no unscoped accessor.
pub struct HistoryStore<'a> {
    pool: &'a PgPool,
}

impl<'a> HistoryStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one calculation. Id and timestamp are assigned here, never by
    /// the client.
    pub async fn append(
        &self,
        user_id: &str,
        weight: f64,
        water_intake: f64,
        steps_goal: i32,
    ) -> AppResult<CalculationEntry> {
        let entry = sqlx::query_as::<_, CalculationEntry>(
            r#"
            INSERT INTO calculation_history (id, user_id, weight, water_intake, steps_goal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(weight)
        .bind(water_intake)
        .bind(steps_goal)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    /// Newest first, at most `limit` entries.
    pub async fn recent(&self, user_id: &str, limit: i64) -> AppResult<Vec<CalculationEntry>> {
        let entries = sqlx::query_as::<_, CalculationEntry>(
            r#"
            SELECT * FROM calculation_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// One newest-first page plus the user's total row count. Page numbers
    /// below 1 are clamped; pages past the end come back empty rather than
    /// erroring.
    pub async fn page(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
    ) -> AppResult<(Vec<CalculationEntry>, i64)> {
        let page = page.max(1);
        let offset = (page as i64 - 1) * page_size as i64;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM calculation_history WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        let entries = sqlx::query_as::<_, CalculationEntry>(
            r#"
            SELECT * FROM calculation_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok((entries, total))
    }

    /// Delete one entry the caller owns. An entry that does not exist and an
    /// entry owned by someone else are the same NotFound.
    pub async fn delete_one(&self, user_id: &str, entry_id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM calculation_history WHERE id = $1 AND user_id = $2")
                .bind(entry_id)
                .bind(user_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("History entry not found".into()));
        }

        Ok(())
    }

    /// Wipe the caller's entire history. Succeeds even when it was already
    /// empty; returns how many rows went away.
    pub async fn delete_all(&self, user_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM calculation_history WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
