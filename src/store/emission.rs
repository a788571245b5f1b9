use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{EmissionRecord, EmissionScope};

use super::StoreError;

/// Filter for fetching pre-computed emission records. The record set is
/// written by the external calculation pipeline; this service reads only.
#[derive(Debug, Clone)]
pub struct EmissionRecordFilter {
    pub organization_id: Uuid,
    pub data_source_ids: Vec<Uuid>,
}

#[async_trait]
pub trait EmissionRecordStore: Send + Sync {
    async fn find(&self, filter: EmissionRecordFilter) -> Result<Vec<EmissionRecord>, StoreError>;
}

#[derive(FromRow)]
struct EmissionRecordRow {
    organization_id: Uuid,
    data_source_id: Uuid,
    scope: Option<String>,
    category: Option<String>,
    value: f64,
}

impl EmissionRecordRow {
    fn into_record(self) -> EmissionRecord {
        EmissionRecord {
            organization_id: self.organization_id,
            data_source_id: self.data_source_id,
            // An unrecognized scope string degrades to the unknown bucket
            // downstream, matching the aggregation tolerance policy.
            scope: self.scope.as_deref().and_then(EmissionScope::parse),
            category: self.category,
            value: self.value,
        }
    }
}

pub struct PgEmissionRecordStore {
    pool: PgPool,
}

impl PgEmissionRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmissionRecordStore for PgEmissionRecordStore {
    async fn find(&self, filter: EmissionRecordFilter) -> Result<Vec<EmissionRecord>, StoreError> {
        let rows = sqlx::query_as::<_, EmissionRecordRow>(
            r#"
            SELECT organization_id, data_source_id, scope, category, value
            FROM emission_records
            WHERE organization_id = $1 AND data_source_id = ANY($2)
            "#,
        )
        .bind(filter.organization_id)
        .bind(&filter.data_source_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmissionRecordRow::into_record).collect())
    }
}
