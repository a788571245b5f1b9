use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::authz::{Actor, AuthzError, AuthzService};
use crate::domain::{AccountType, Membership, NewOrganization, Organization, Role};
use crate::store::{OrganizationStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum OrgError {
    #[error(transparent)]
    Authz(#[from] AuthzError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid organization name: {0}")]
    InvalidName(String),
    #[error("user {0} is already a member")]
    AlreadyMember(Uuid),
    #[error("an organization must keep at least one admin")]
    LastAdmin,
}

/// Organization and membership lifecycle. Authorization is checked here,
/// before any store mutation; the store never makes access decisions.
pub struct OrgService {
    orgs: Arc<dyn OrganizationStore>,
}

impl OrgService {
    pub fn new(orgs: Arc<dyn OrganizationStore>) -> Self {
        Self { orgs }
    }

    /// Create an organization with the creator as its initial admin.
    pub async fn create_organization(
        &self,
        actor: Option<&Actor>,
        name: &str,
        account_type: AccountType,
    ) -> Result<Organization, OrgError> {
        let actor = AuthzService::require_authenticated(actor)?;
        Self::validate_name(name)?;

        let initial_admin =
            Membership { user_id: actor.user_id, role: Role::Admin, created_at: Utc::now() };
        let org = self
            .orgs
            .create(NewOrganization { name: name.to_string(), account_type }, initial_admin)
            .await?;

        tracing::info!(org = %org.id, creator = %actor.user_id, "organization created");
        Ok(org)
    }

    /// Invite a user into an organization. Members may invite at or below
    /// their own role; site admins may invite at any level.
    pub async fn invite_member(
        &self,
        actor: Option<&Actor>,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), OrgError> {
        let actor = AuthzService::require_authenticated(actor)?;
        let org = self.load_concealed(org_id).await?;

        AuthzService::require_site_admin_or_org_role(actor, &org, Role::User)?;
        AuthzService::authorize_grant(actor, &org, role)?;

        if org.membership_of(user_id).is_some() {
            return Err(OrgError::AlreadyMember(user_id));
        }

        self.orgs
            .add_membership(org_id, Membership { user_id, role, created_at: Utc::now() })
            .await?;

        tracing::info!(org = %org_id, invitee = %user_id, role = %role, "member invited");
        Ok(())
    }

    /// Change an existing member's role. Requires org admin (or site admin);
    /// the escalation cap applies to non-site-admins.
    pub async fn change_role(
        &self,
        actor: Option<&Actor>,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), OrgError> {
        let actor = AuthzService::require_authenticated(actor)?;
        let org = self.load_concealed(org_id).await?;

        AuthzService::require_site_admin_or_org_role(actor, &org, Role::Admin)?;
        AuthzService::authorize_grant(actor, &org, role)?;

        let current = org
            .role_of(user_id)
            .ok_or_else(|| StoreError::NotFound(format!("membership of user {user_id}")))?;

        // Demoting the only admin would leave the org unadministrable
        if current.rank() >= Role::Admin.rank()
            && role.rank() < Role::Admin.rank()
            && org.admin_count() <= 1
        {
            return Err(OrgError::LastAdmin);
        }

        self.orgs.update_membership_role(org_id, user_id, role).await?;
        tracing::info!(org = %org_id, member = %user_id, role = %role, "member role changed");
        Ok(())
    }

    /// Remove a member. Requires org admin (or site admin); the last admin
    /// cannot be removed.
    pub async fn remove_member(
        &self,
        actor: Option<&Actor>,
        org_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), OrgError> {
        let actor = AuthzService::require_authenticated(actor)?;
        let org = self.load_concealed(org_id).await?;

        AuthzService::require_site_admin_or_org_role(actor, &org, Role::Admin)?;

        if let Some(current) = org.role_of(user_id) {
            if current.rank() >= Role::Admin.rank() && org.admin_count() <= 1 {
                return Err(OrgError::LastAdmin);
            }
        }

        self.orgs.remove_membership(org_id, user_id).await?;
        tracing::info!(org = %org_id, member = %user_id, "member removed");
        Ok(())
    }

    pub async fn get_organization(
        &self,
        actor: Option<&Actor>,
        org_id: Uuid,
    ) -> Result<Organization, OrgError> {
        let actor = AuthzService::require_authenticated(actor)?;
        let org = self.load_concealed(org_id).await?;
        AuthzService::require_site_admin_or_org_role(actor, &org, Role::Guest)?;
        Ok(org)
    }

    /// Missing organizations surface as Forbidden from membership-gated
    /// operations so callers cannot probe for existence.
    async fn load_concealed(&self, org_id: Uuid) -> Result<Organization, OrgError> {
        let org = self
            .orgs
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| AuthzError::forbidden("access denied"))?;
        Ok(org)
    }

    fn validate_name(name: &str) -> Result<(), OrgError> {
        let trimmed = name.trim();
        if trimmed.len() < 2 {
            return Err(OrgError::InvalidName("must be at least 2 characters".into()));
        }
        if trimmed.len() > 120 {
            return Err(OrgError::InvalidName("must be at most 120 characters".into()));
        }
        Ok(())
    }
}
