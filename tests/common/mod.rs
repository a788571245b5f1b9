#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use verdis_api::authz::Actor;
use verdis_api::domain::{
    AccountType, DataSourceRecord, DataSourceStatus, EmissionRecord, EmissionScope, Membership,
    NewDataSourceRecord, NewOrganization, Organization, Role,
};
use verdis_api::impact::{StatusLookup, StatusLookupError};
use verdis_api::store::{
    DataSourceStore, EmissionRecordFilter, EmissionRecordStore, OrganizationStore, StoreError,
};

/// In-memory organization store backing the service tests.
#[derive(Default)]
pub struct MemoryOrgStore {
    orgs: Mutex<HashMap<Uuid, Organization>>,
}

impl MemoryOrgStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an organization directly, bypassing the service layer.
    pub fn seed(&self, account_type: AccountType, members: &[(Uuid, Role)]) -> Uuid {
        let id = Uuid::new_v4();
        let org = Organization {
            id,
            name: format!("org-{}", &id.simple().to_string()[..8]),
            account_type,
            memberships: members
                .iter()
                .map(|&(user_id, role)| Membership { user_id, role, created_at: Utc::now() })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.orgs.lock().unwrap().insert(id, org);
        id
    }
}

#[async_trait]
impl OrganizationStore for MemoryOrgStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, StoreError> {
        Ok(self.orgs.lock().unwrap().get(&id).cloned())
    }

    async fn create(
        &self,
        new: NewOrganization,
        initial_admin: Membership,
    ) -> Result<Organization, StoreError> {
        let org = Organization {
            id: Uuid::new_v4(),
            name: new.name,
            account_type: new.account_type,
            memberships: vec![initial_admin],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.orgs.lock().unwrap().insert(org.id, org.clone());
        Ok(org)
    }

    async fn add_membership(&self, org_id: Uuid, membership: Membership) -> Result<(), StoreError> {
        let mut orgs = self.orgs.lock().unwrap();
        let org = orgs
            .get_mut(&org_id)
            .ok_or_else(|| StoreError::NotFound(format!("organization {org_id}")))?;
        if org.membership_of(membership.user_id).is_some() {
            return Err(StoreError::Conflict(format!(
                "user {} is already a member of organization {org_id}",
                membership.user_id
            )));
        }
        org.memberships.push(membership);
        Ok(())
    }

    async fn update_membership_role(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), StoreError> {
        let mut orgs = self.orgs.lock().unwrap();
        let org = orgs
            .get_mut(&org_id)
            .ok_or_else(|| StoreError::NotFound(format!("organization {org_id}")))?;
        let membership = org
            .memberships
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("membership of user {user_id}")))?;
        membership.role = role;
        Ok(())
    }

    async fn remove_membership(&self, org_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        let mut orgs = self.orgs.lock().unwrap();
        let org = orgs
            .get_mut(&org_id)
            .ok_or_else(|| StoreError::NotFound(format!("organization {org_id}")))?;
        let before = org.memberships.len();
        org.memberships.retain(|m| m.user_id != user_id);
        if org.memberships.len() == before {
            return Err(StoreError::NotFound(format!("membership of user {user_id}")));
        }
        Ok(())
    }
}

/// Fixed emission-record set standing in for the calculation pipeline output.
pub struct MemoryEmissionStore {
    records: Vec<EmissionRecord>,
}

impl MemoryEmissionStore {
    pub fn new(records: Vec<EmissionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl EmissionRecordStore for MemoryEmissionStore {
    async fn find(&self, filter: EmissionRecordFilter) -> Result<Vec<EmissionRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.organization_id == filter.organization_id
                    && filter.data_source_ids.contains(&r.data_source_id)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryDataSourceStore {
    pub created: Mutex<Vec<DataSourceRecord>>,
}

impl MemoryDataSourceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSourceStore for MemoryDataSourceStore {
    async fn create(&self, new: NewDataSourceRecord) -> Result<DataSourceRecord, StoreError> {
        let record = DataSourceRecord {
            id: Uuid::new_v4(),
            organization_id: new.organization_id,
            kind: new.kind,
            name: new.name,
            fields: new.fields,
            created_at: Utc::now(),
        };
        self.created.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// Scripted replacement for the external calculation status service.
#[derive(Default)]
pub struct ScriptedStatusLookup {
    statuses: HashMap<Uuid, String>,
}

impl ScriptedStatusLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, id: Uuid, status: &str) -> Self {
        self.statuses.insert(id, status.to_string());
        self
    }
}

#[async_trait]
impl StatusLookup for ScriptedStatusLookup {
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

pub fn actor(site_role: Option<Role>) -> Actor {
    let user_id = Uuid::new_v4();
    Actor { user_id, email: format!("{user_id}@example.com"), site_role }
}

pub fn site_admin() -> Actor {
    actor(Some(Role::SuperAdmin))
}

pub fn regular_user() -> Actor {
    actor(None)
}

pub fn emission(
    org: Uuid,
    data_source: Uuid,
    scope: Option<EmissionScope>,
    category: Option<&str>,
    value: f64,
) -> EmissionRecord {
    EmissionRecord {
        organization_id: org,
        data_source_id: data_source,
        scope,
        category: category.map(String::from),
        value,
    }
}
