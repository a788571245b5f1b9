use std::sync::Arc;

use uuid::Uuid;

use crate::domain::EmissionSummary;
use crate::store::{EmissionRecordFilter, EmissionRecordStore, StoreError};

use super::completion::{is_calculation_complete, StatusLookup, StatusLookupError};

#[derive(Debug, thiserror::Error)]
pub enum ImpactError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    StatusLookup(#[from] StatusLookupError),
}

/// Emissions-impact read path: fetch pre-computed records, aggregate in
/// memory, answer completion queries. Recomputes from scratch on every call;
/// no caching or retry.
pub struct CalculatedImpactService {
    records: Arc<dyn EmissionRecordStore>,
    status: Arc<dyn StatusLookup>,
}

impl CalculatedImpactService {
    pub fn new(records: Arc<dyn EmissionRecordStore>, status: Arc<dyn StatusLookup>) -> Self {
        Self { records, status }
    }

    /// Hierarchical summary (total -> scope -> category) of the emission
    /// records for the given data sources of an organization.
    pub async fn summary(
        &self,
        organization_id: Uuid,
        data_source_ids: Vec<Uuid>,
    ) -> Result<EmissionSummary, ImpactError> {
        let records = self
            .records
            .find(EmissionRecordFilter { organization_id, data_source_ids })
            .await?;

        tracing::debug!(org = %organization_id, records = records.len(), "aggregating emission records");
        Ok(super::aggregate(&records))
    }

    /// True iff every listed data source has finished calculating (including
    /// calculations that finished by failing).
    pub async fn is_calculation_complete(
        &self,
        auth_token: &str,
        data_source_ids: &[Uuid],
    ) -> Result<bool, ImpactError> {
        let complete =
            is_calculation_complete(self.status.as_ref(), auth_token, data_source_ids).await?;
        Ok(complete)
    }
}
