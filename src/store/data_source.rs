use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{DataSourceKind, DataSourceRecord, NewDataSourceRecord};

use super::StoreError;

#[async_trait]
pub trait DataSourceStore: Send + Sync {
    async fn create(&self, new: NewDataSourceRecord) -> Result<DataSourceRecord, StoreError>;
}

#[derive(FromRow)]
struct DataSourceRow {
    id: Uuid,
    organization_id: Uuid,
    kind: String,
    name: String,
    fields: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl DataSourceRow {
    fn into_record(self) -> Result<DataSourceRecord, StoreError> {
        let kind = DataSourceKind::parse(&self.kind)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown data source kind '{}'", self.kind)))?;
        Ok(DataSourceRecord {
            id: self.id,
            organization_id: self.organization_id,
            kind,
            name: self.name,
            fields: self.fields,
            created_at: self.created_at,
        })
    }
}

pub struct PgDataSourceStore {
    pool: PgPool,
}

impl PgDataSourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataSourceStore for PgDataSourceStore {
    async fn create(&self, new: NewDataSourceRecord) -> Result<DataSourceRecord, StoreError> {
        let row = sqlx::query_as::<_, DataSourceRow>(
            r#"
            INSERT INTO data_sources (id, organization_id, kind, name, fields, created_at)
            VALUES ($1, $2, $3, $4, $5, now())
            RETURNING id, organization_id, kind, name, fields, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.organization_id)
        .bind(new.kind.as_str())
        .bind(&new.name)
        .bind(&new.fields)
        .fetch_one(&self.pool)
        .await?;

        row.into_record()
    }
}
