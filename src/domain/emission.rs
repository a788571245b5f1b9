use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All summary output is expressed in this unit. Records are pre-normalized
/// to it by the upstream calculation pipeline; no conversion happens here.
pub const EMISSION_UNIT: &str = "kgCO2e";

/// Greenhouse-gas accounting scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmissionScope {
    #[serde(rename = "Scope 1")]
    Scope1,
    #[serde(rename = "Scope 2")]
    Scope2,
    #[serde(rename = "Scope 3")]
    Scope3,
}

impl EmissionScope {
    pub fn label(self) -> &'static str {
        match self {
            EmissionScope::Scope1 => "Scope 1",
            EmissionScope::Scope2 => "Scope 2",
            EmissionScope::Scope3 => "Scope 3",
        }
    }

    pub fn parse(s: &str) -> Option<EmissionScope> {
        match s {
            "Scope 1" => Some(EmissionScope::Scope1),
            "Scope 2" => Some(EmissionScope::Scope2),
            "Scope 3" => Some(EmissionScope::Scope3),
            _ => None,
        }
    }
}

/// Immutable computed fact produced by the external calculation pipeline.
/// Scope and category may be absent; the aggregation engine buckets such
/// records under "unknown" rather than rejecting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub organization_id: Uuid,
    pub data_source_id: Uuid,
    pub scope: Option<EmissionScope>,
    pub category: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    pub value: f64,
    pub unit: String,
}

impl Emission {
    pub fn new(value: f64) -> Self {
        Self { value, unit: EMISSION_UNIT.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub emission: Emission,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeSummary {
    pub scope: String,
    pub emission: Emission,
    pub category_breakdown: Vec<CategorySummary>,
}

/// Derived on every query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionSummary {
    pub total_emissions: Emission,
    pub scopes: Vec<ScopeSummary>,
}
