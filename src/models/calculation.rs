use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted calculation. `user_id` is the identity provider's opaque
/// subject, not a key into any local table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalculationEntry {
    pub id: Uuid,
    pub user_id: String,
    pub weight: f64,
    pub water_intake: f64,
    pub steps_goal: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    // Kept untyped so the calculator can distinguish missing, non-numeric,
    // and out-of-range values with its own messages.
    pub weight: Option<serde_json::Value>,
}
