pub mod data_source;
pub mod emission;
pub mod organization;
pub mod status_client;
pub mod user;

pub use data_source::{DataSourceStore, PgDataSourceStore};
pub use emission::{EmissionRecordFilter, EmissionRecordStore, PgEmissionRecordStore};
pub use organization::{OrganizationStore, PgOrganizationStore};
pub use status_client::CalculationStatusClient;
pub use user::{PgUserStore, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
