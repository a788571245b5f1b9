use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    Fuel,
    Heating,
    Electricity,
    Expenses,
}

impl DataSourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSourceKind::Fuel => "fuel",
            DataSourceKind::Heating => "heating",
            DataSourceKind::Electricity => "electricity",
            DataSourceKind::Expenses => "expenses",
        }
    }

    pub fn parse(s: &str) -> Option<DataSourceKind> {
        match s {
            "fuel" => Some(DataSourceKind::Fuel),
            "heating" => Some(DataSourceKind::Heating),
            "electricity" => Some(DataSourceKind::Electricity),
            "expenses" => Some(DataSourceKind::Expenses),
            _ => None,
        }
    }
}

/// Normalized intake record produced from questionnaire answers. The
/// calculation pipeline that consumes these is external to this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceRecord {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub kind: DataSourceKind,
    pub name: String,
    pub fields: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Payload for persisting a data source; the store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDataSourceRecord {
    pub organization_id: Uuid,
    pub kind: DataSourceKind,
    pub name: String,
    pub fields: serde_json::Value,
}

/// Processing status reported by the external calculation service. The
/// status vocabulary is open-ended; only two values are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSourceStatus(pub String);

impl DataSourceStatus {
    /// "Completed" deliberately includes failure: a failed calculation is
    /// finished, just not successful.
    pub fn is_terminal(&self) -> bool {
        matches!(self.0.as_str(), "succeeded" | "failed")
    }
}

impl std::fmt::Display for DataSourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
