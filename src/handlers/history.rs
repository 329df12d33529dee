use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::history::{HistoryStore, PAGE_SIZE};
use crate::error::AppResult;
use crate::models::calculation::CalculationEntry;
use crate::AppState;

const RECENT_DEFAULT: i64 = 5;
const RECENT_MAX: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PageMeta {
    fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<CalculationEntry>,
    pub pagination: PageMeta,
}

pub async fn list_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryPage>> {
    let page = query.page.unwrap_or(1).max(1);

    let store = HistoryStore::new(&state.db);
    let (entries, total) = store.page(&auth_user.id, page, PAGE_SIZE).await?;

    Ok(Json(HistoryPage {
        entries,
        pagination: PageMeta::new(page, PAGE_SIZE, total),
    }))
}

/// The short preview shown next to the calculator form.
pub async fn recent_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<CalculationEntry>>> {
    let limit = query.limit.unwrap_or(RECENT_DEFAULT).clamp(1, RECENT_MAX);

    let entries = HistoryStore::new(&state.db)
        .recent(&auth_user.id, limit)
        .await?;

    Ok(Json(entries))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    HistoryStore::new(&state.db)
        .delete_one(&auth_user.id, entry_id)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    let count = HistoryStore::new(&state.db)
        .delete_all(&auth_user.id)
        .await?;

    tracing::info!(user_id = %auth_user.id, count = count, "History cleared");

    Ok(Json(serde_json::json!({ "deleted": true, "count": count })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use chrono::Utc;
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::Config;

    #[test]
    fn test_page_meta_rounds_total_pages_up() {
        assert_eq!(PageMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PageMeta::new(1, 10, 1).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_pages, 2);
        assert_eq!(PageMeta::new(1, 10, 95).total_pages, 10);
    }

    #[test]
    fn test_history_page_wire_shape() {
        let entry = CalculationEntry {
            id: Uuid::new_v4(),
            user_id: "user-123".into(),
            weight: 70.0,
            water_intake: 2.3,
            steps_goal: 10_000,
            created_at: Utc::now(),
        };
        let page = HistoryPage {
            entries: vec![entry],
            pagination: PageMeta::new(1, PAGE_SIZE, 1),
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["pagination"]["page"], 1);
        assert_eq!(value["pagination"]["page_size"], 10);
        assert_eq!(value["pagination"]["total_items"], 1);
        assert_eq!(value["pagination"]["total_pages"], 1);
        assert_eq!(value["entries"][0]["weight"], 70.0);
        assert_eq!(value["entries"][0]["steps_goal"], 10_000);
    }

    #[test]
    fn test_queries_tolerate_missing_params() {
        let q: HistoryQuery = serde_json::from_str("{}").unwrap();
        assert!(q.page.is_none());

        let q: RecentQuery = serde_json::from_str("{}").unwrap();
        assert!(q.limit.is_none());
    }

    fn history_app() -> Router {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://127.0.0.1:1/healthbuddy_test")
            .unwrap();
        let state = AppState {
            db,
            config: Arc::new(Config {
                database_url: "postgres://127.0.0.1:1/healthbuddy_test".into(),
                host: "127.0.0.1".into(),
                port: 0,
                frontend_url: "http://localhost:3000".into(),
                session_secret: "test-secret".into(),
            }),
        };
        Router::new()
            .route("/api/history", get(list_history))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                crate::auth::middleware::require_auth,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_history_requires_bearer_token() {
        let res = history_app()
            .oneshot(
                Request::builder()
                    .uri("/api/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Authentication required");
    }

    #[tokio::test]
    async fn test_history_rejects_unverifiable_token() {
        let res = history_app()
            .oneshot(
                Request::builder()
                    .uri("/api/history")
                    .header(header::AUTHORIZATION, "Bearer not-a-session-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
