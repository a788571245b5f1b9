use async_trait::async_trait;
use futures::future::try_join_all;
use uuid::Uuid;

use crate::domain::DataSourceStatus;

/// Status lookup against the external data-source tracking service. The
/// implementation owns transport concerns (timeouts, TLS); this layer defines
/// no retry or cancellation behavior of its own.
#[async_trait]
pub trait StatusLookup: Send + Sync {
    async fn get_status(
        &self,
        auth_token: &str,
        data_source_id: Uuid,
    ) -> Result<DataSourceStatus, StatusLookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StatusLookupError {
    #[error("status service request failed: {0}")]
    Transport(String),
    #[error("status service returned HTTP {0}")]
    Upstream(u16),
    #[error("status service returned an unreadable body: {0}")]
    InvalidBody(String),
}

/// True iff every data source has reached a terminal status (succeeded or
/// failed). A failed calculation counts as complete; only non-terminal
/// statuses such as "pending" hold the result at false. Empty input is
/// vacuously complete.
///
/// Lookups are independent and dispatched concurrently. A lookup *error* is
/// not the same as an incomplete calculation and propagates to the caller.
pub async fn is_calculation_complete(
    lookup: &dyn StatusLookup,
    auth_token: &str,
    data_source_ids: &[Uuid],
) -> Result<bool, StatusLookupError> {
    let statuses = try_join_all(
        data_source_ids
            .iter()
            .map(|&id| lookup.get_status(auth_token, id)),
    )
    .await?;

    Ok(statuses.iter().all(DataSourceStatus::is_terminal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLookup {
        statuses: HashMap<Uuid, String>,
    }

    #[async_trait]
    impl StatusLookup for MapLookup {
        async fn get_status(
            &self,
            _auth_token: &str,
            data_source_id: Uuid,
        ) -> Result<DataSourceStatus, StatusLookupError> {
            self.statuses
                .get(&data_source_id)
                .map(|s| DataSourceStatus(s.clone()))
                .ok_or_else(|| StatusLookupError::Upstream(404))
        }
    }

    fn lookup_with(statuses: &[&str]) -> (MapLookup, Vec<Uuid>) {
        let mut map = HashMap::new();
        let mut ids = Vec::new();
        for s in statuses {
            let id = Uuid::new_v4();
            map.insert(id, s.to_string());
            ids.push(id);
        }
        (MapLookup { statuses: map }, ids)
    }

    #[tokio::test]
    async fn all_terminal_statuses_mean_complete() {
        let (lookup, ids) = lookup_with(&["succeeded", "failed", "succeeded"]);
        assert!(is_calculation_complete(&lookup, "token", &ids).await.unwrap());
    }

    #[tokio::test]
    async fn any_pending_status_means_incomplete() {
        let (lookup, ids) = lookup_with(&["succeeded", "pending"]);
        assert!(!is_calculation_complete(&lookup, "token", &ids).await.unwrap());
    }

    #[tokio::test]
    async fn empty_id_list_is_vacuously_complete() {
        let (lookup, _) = lookup_with(&[]);
        assert!(is_calculation_complete(&lookup, "token", &[]).await.unwrap());
    }

    #[tokio::test]
    async fn lookup_failure_propagates_instead_of_reading_as_incomplete() {
        let (lookup, _) = lookup_with(&[]);
        let unknown = vec![Uuid::new_v4()];
        let result = is_calculation_complete(&lookup, "token", &unknown).await;
        assert!(matches!(result, Err(StatusLookupError::Upstream(404))));
    }
}
