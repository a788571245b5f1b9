pub mod org_service;

pub use org_service::{OrgError, OrgService};
