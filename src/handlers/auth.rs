use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// POST /auth/login - exchange an upstream-asserted identity for an API token.
///
/// Credential verification happens at the identity provider in front of this
/// service; this endpoint only resolves the user record and issues the JWT
/// the rest of the API consumes.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("unknown user"))?;

    let token = generate_jwt(Claims::for_user(&user))?;

    tracing::info!(user = %user.id, "issued API token");
    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": {
                "id": user.id,
                "email": user.email,
                "name": user.name,
                "site_role": user.site_role,
            }
        }
    })))
}
