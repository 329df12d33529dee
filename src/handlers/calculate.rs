use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::calculator::{self, Tip, WeightError};
use crate::db::history::HistoryStore;
use crate::error::{AppError, AppResult};
use crate::models::calculation::CalculateRequest;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub water_intake: f64,
    pub steps_goal: i32,
    pub saved: bool,
    pub tips: Vec<Tip>,
}

/// Compute daily goals for a submitted weight. Anonymous requests get the
/// result only; a verified identity also gets the calculation appended to
/// its history.
pub async fn calculate(
    State(state): State<AppState>,
    Extension(identity): Extension<Option<AuthUser>>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> AppResult<Json<CalculateResponse>> {
    // A body that is not JSON at all lands in the same bucket as a
    // non-numeric weight.
    let Json(body) = body.map_err(|_| WeightError::NotANumber)?;

    let weight = calculator::parse_weight(body.weight.as_ref())?;
    let goals = calculator::compute(weight);

    let saved = match identity {
        Some(user) => {
            let store = HistoryStore::new(&state.db);
            match store
                .append(&user.id, weight, goals.water_intake, goals.steps_goal)
                .await
            {
                Ok(entry) => {
                    tracing::debug!(user_id = %user.id, entry_id = %entry.id, "Calculation saved");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, user_id = %user.id, "Failed to save calculation");
                    return Err(AppError::CalculationFailed);
                }
            }
        }
        None => false,
    };

    Ok(Json(CalculateResponse {
        water_intake: goals.water_intake,
        steps_goal: goals.steps_goal,
        saved,
        tips: goals.tips,
    }))
}
