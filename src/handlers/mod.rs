pub mod auth;
pub mod impact;
pub mod org;
pub mod starter;

use std::sync::Arc;

use crate::impact::CalculatedImpactService;
use crate::services::OrgService;
use crate::starter::StarterService;
use crate::store::UserStore;

/// Shared handler dependencies, injected through axum state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub org_service: Arc<OrgService>,
    pub impact_service: Arc<CalculatedImpactService>,
    pub starter_service: Arc<StarterService>,
}
