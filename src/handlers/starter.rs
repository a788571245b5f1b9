use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::starter::StarterAnswers;

use super::AppState;

/// POST /api/orgs/:org_id/starter - submit questionnaire answers.
pub async fn starter_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<Uuid>,
    Json(answers): Json<StarterAnswers>,
) -> Result<Json<Value>, ApiError> {
    let created = state
        .starter_service
        .submit(Some(&auth.actor()), org_id, answers)
        .await?;

    Ok(Json(json!({ "success": true, "data": created })))
}
