use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ImpactQuery {
    /// Comma-separated data source ids
    pub data_source_ids: Option<String>,
}

fn parse_ids(query: &ImpactQuery) -> Result<Vec<Uuid>, ApiError> {
    let Some(raw) = query.data_source_ids.as_deref() else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            Uuid::parse_str(s.trim())
                .map_err(|_| ApiError::bad_request(format!("invalid data source id '{}'", s.trim())))
        })
        .collect()
}

/// GET /api/orgs/:org_id/impact/summary
pub async fn summary_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ImpactQuery>,
) -> Result<Json<Value>, ApiError> {
    // Membership gate; the summary itself is a pure function of the records
    state.org_service.get_organization(Some(&auth.actor()), org_id).await?;

    let data_source_ids = parse_ids(&query)?;
    let summary = state.impact_service.summary(org_id, data_source_ids).await?;

    Ok(Json(json!({ "success": true, "data": summary })))
}

/// GET /api/orgs/:org_id/impact/complete
pub async fn complete_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ImpactQuery>,
) -> Result<Json<Value>, ApiError> {
    state.org_service.get_organization(Some(&auth.actor()), org_id).await?;

    let data_source_ids = parse_ids(&query)?;
    let complete = state
        .impact_service
        .is_calculation_complete(&auth.token, &data_source_ids)
        .await?;

    Ok(Json(json!({ "success": true, "data": { "complete": complete } })))
}
