pub mod org_validator;
pub mod service;

pub use org_validator::OrgValidator;
pub use service::{Actor, AuthzService, StarterAuthzService};

/// Authorization failure taxonomy. `Forbidden` carries a human-readable
/// reason but is mapped to a generic 403 at the HTTP layer so that resource
/// existence is never revealed to unauthorized callers.
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(String),
}

impl AuthzError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        AuthzError::Forbidden(reason.into())
    }
}
