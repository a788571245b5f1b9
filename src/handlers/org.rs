use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::{AccountType, Role};
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrgRequest {
    pub name: String,
    pub account_type: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub role: String,
}

fn parse_role(s: &str) -> Result<Role, ApiError> {
    Role::parse(s).ok_or_else(|| ApiError::bad_request(format!("unknown role '{}'", s)))
}

/// POST /api/orgs
pub async fn org_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateOrgRequest>,
) -> Result<Json<Value>, ApiError> {
    let account_type = AccountType::parse(&payload.account_type)
        .ok_or_else(|| ApiError::bad_request(format!("unknown account type '{}'", payload.account_type)))?;

    let org = state
        .org_service
        .create_organization(Some(&auth.actor()), &payload.name, account_type)
        .await?;

    Ok(Json(json!({ "success": true, "data": org })))
}

/// GET /api/orgs/:org_id
pub async fn org_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let org = state.org_service.get_organization(Some(&auth.actor()), org_id).await?;
    Ok(Json(json!({ "success": true, "data": org })))
}

/// POST /api/orgs/:org_id/members
pub async fn member_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<InviteRequest>,
) -> Result<Json<Value>, ApiError> {
    let role = parse_role(&payload.role)?;
    state
        .org_service
        .invite_member(Some(&auth.actor()), org_id, payload.user_id, role)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// PUT /api/orgs/:org_id/members/:user_id
pub async fn member_role_put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((org_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<RoleChangeRequest>,
) -> Result<Json<Value>, ApiError> {
    let role = parse_role(&payload.role)?;
    state
        .org_service
        .change_role(Some(&auth.actor()), org_id, user_id, role)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/orgs/:org_id/members/:user_id
pub async fn member_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((org_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    state
        .org_service
        .remove_member(Some(&auth.actor()), org_id, user_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
