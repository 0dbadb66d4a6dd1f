//! HTTP routes and handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use feedtriage_core::{FeedbackItem, FeedbackUpdate};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analytics::{self, Analytics, TrendPoint};
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::models::{ApiResponse, ListQuery, SubmitFeedbackRequest, TrendsQuery};
use crate::security::AdminGuard;
use crate::state::AppState;

/// Build the router. Feedback and analytics routes are served both at the
/// root and under `/api`.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let api = api_routes();

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest("/api", api.clone())
        .merge(api)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(list_feedback).post(submit_feedback))
        .route(
            "/feedback/:id",
            get(get_feedback).put(update_feedback).delete(delete_feedback),
        )
        .route("/analytics", get(analytics_summary))
        .route("/analytics/trends", get(analytics_trends))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.cors_allow_any_origin {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackItem>>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let saved = state.submit(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(saved).with_message("Feedback submitted successfully")),
    ))
}

async fn list_feedback(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<FeedbackItem>>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let mut items: Vec<FeedbackItem> = state
        .store
        .list()
        .await?
        .into_iter()
        .rev()
        .filter(|item| query.matches(item))
        .collect();
    // stable, so equal timestamps keep the later insert first
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let count = items.len();
    Ok(Json(ApiResponse::ok(items).with_count(count)))
}

async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FeedbackItem>>, AppError> {
    let item = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;
    Ok(Json(ApiResponse::ok(item)))
}

async fn update_feedback(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FeedbackUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<FeedbackItem>>, AppError> {
    let Json(update) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let item = state
        .store
        .update(&id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;

    info!(id = %item.id, status = %item.status, "Feedback updated");
    Ok(Json(
        ApiResponse::ok(item).with_message("Feedback updated successfully"),
    ))
}

async fn delete_feedback(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound("Feedback not found".to_string()));
    }

    info!(id = %id, "Feedback deleted");
    Ok(Json(ApiResponse::message("Feedback deleted successfully")))
}

async fn analytics_summary(
    _admin: AdminGuard,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Analytics>>, AppError> {
    let items = state.store.list().await?;
    Ok(Json(ApiResponse::ok(analytics::summarize(&items))))
}

async fn analytics_trends(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<ApiResponse<Vec<TrendPoint>>>, AppError> {
    let days = analytics::trend_days(query.days.as_deref());
    let items = state.store.list().await?;
    let points = analytics::trends(&items, days, Utc::now().date_naive());
    Ok(Json(ApiResponse::ok(points)))
}

async fn fallback() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
