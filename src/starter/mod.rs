pub mod answers;
pub mod parsers;

pub use answers::{
    validate, ElectricityAnswers, ExpenseAnswer, FuelAnswers, HeatingAnswers, StarterAnswers,
    ValidAnswers, ValidationError,
};
pub use parsers::parse_answers;

use std::sync::Arc;

use uuid::Uuid;

use crate::authz::{Actor, AuthzError, StarterAuthzService};
use crate::domain::{DataSourceRecord, Role};
use crate::store::{DataSourceStore, OrganizationStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StarterError {
    #[error("invalid starter answers")]
    Validation(Vec<ValidationError>),
    #[error(transparent)]
    Authz(#[from] AuthzError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Starter intake wizard: authorize, validate, parse, persist. The pure
/// parsing core never touches storage; this service does the fetching and
/// writing around it.
pub struct StarterService {
    orgs: Arc<dyn OrganizationStore>,
    data_sources: Arc<dyn DataSourceStore>,
}

impl StarterService {
    pub fn new(orgs: Arc<dyn OrganizationStore>, data_sources: Arc<dyn DataSourceStore>) -> Self {
        Self { orgs, data_sources }
    }

    pub async fn submit(
        &self,
        actor: Option<&Actor>,
        organization_id: Uuid,
        answers: StarterAnswers,
    ) -> Result<Vec<DataSourceRecord>, StarterError> {
        // A missing organization reads as Forbidden here so unauthorized
        // callers cannot probe for organization existence
        let org = self
            .orgs
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| AuthzError::forbidden("access denied"))?;

        StarterAuthzService::authorize(actor, &org, Role::User)?;

        let valid = validate(answers).map_err(StarterError::Validation)?;
        let new_records = parse_answers(organization_id, &valid);

        let mut created = Vec::with_capacity(new_records.len());
        for record in new_records {
            created.push(self.data_sources.create(record).await?);
        }

        tracing::info!(org = %organization_id, count = created.len(), "starter intake created data sources");
        Ok(created)
    }
}
