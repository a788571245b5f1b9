mod common;

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use common::{emission, MemoryEmissionStore, ScriptedStatusLookup};
use verdis_api::domain::{EmissionScope, EMISSION_UNIT};
use verdis_api::impact::{CalculatedImpactService, ImpactError};

fn service(
    records: Vec<verdis_api::domain::EmissionRecord>,
    lookup: ScriptedStatusLookup,
) -> CalculatedImpactService {
    CalculatedImpactService::new(Arc::new(MemoryEmissionStore::new(records)), Arc::new(lookup))
}

#[tokio::test]
async fn summary_covers_only_requested_data_sources() -> Result<()> {
    let org = Uuid::new_v4();
    let ds1 = Uuid::new_v4();
    let ds2 = Uuid::new_v4();
    let other_ds = Uuid::new_v4();

    let records = vec![
        emission(org, ds1, Some(EmissionScope::Scope1), Some("Fleet"), 10.0),
        emission(org, ds1, Some(EmissionScope::Scope1), Some("Heating"), 20.0),
        emission(org, ds2, Some(EmissionScope::Scope2), Some("Electricity"), 5.0),
        // Not requested; must not contribute
        emission(org, other_ds, Some(EmissionScope::Scope3), Some("Travel"), 99.0),
    ];

    let service = service(records, ScriptedStatusLookup::new());
    let summary = service.summary(org, vec![ds1, ds2]).await?;

    assert_eq!(summary.total_emissions.value, 35.0);
    assert_eq!(summary.total_emissions.unit, EMISSION_UNIT);
    assert_eq!(summary.scopes.len(), 2);

    let scope1 = summary.scopes.iter().find(|s| s.scope == "Scope 1").unwrap();
    assert_eq!(scope1.emission.value, 30.0);
    Ok(())
}

#[tokio::test]
async fn summary_of_foreign_org_is_empty() -> Result<()> {
    let org = Uuid::new_v4();
    let ds = Uuid::new_v4();
    let records = vec![emission(org, ds, Some(EmissionScope::Scope1), Some("Fleet"), 10.0)];

    let service = service(records, ScriptedStatusLookup::new());
    let summary = service.summary(Uuid::new_v4(), vec![ds]).await?;

    assert_eq!(summary.total_emissions.value, 0.0);
    assert!(summary.scopes.is_empty());
    Ok(())
}

#[tokio::test]
async fn completion_treats_failed_as_terminal() -> Result<()> {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let lookup = ScriptedStatusLookup::new()
        .with_status(a, "succeeded")
        .with_status(b, "failed")
        .with_status(c, "succeeded");

    let service = service(vec![], lookup);
    assert!(service.is_calculation_complete("token", &[a, b, c]).await?);
    Ok(())
}

#[tokio::test]
async fn pending_calculation_is_incomplete() -> Result<()> {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let lookup = ScriptedStatusLookup::new()
        .with_status(a, "succeeded")
        .with_status(b, "pending");

    let service = service(vec![], lookup);
    assert!(!service.is_calculation_complete("token", &[a, b]).await?);
    Ok(())
}

#[tokio::test]
async fn no_data_sources_is_vacuously_complete() -> Result<()> {
    let service = service(vec![], ScriptedStatusLookup::new());
    assert!(service.is_calculation_complete("token", &[]).await?);
    Ok(())
}

#[tokio::test]
async fn status_lookup_failure_is_an_error_not_incomplete() {
    let service = service(vec![], ScriptedStatusLookup::new());
    let result = service.is_calculation_complete("token", &[Uuid::new_v4()]).await;
    assert!(matches!(result, Err(ImpactError::StatusLookup(_))));
}
