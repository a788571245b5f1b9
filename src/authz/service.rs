use uuid::Uuid;

use crate::domain::{is_role_at_most, AccountType, Organization, Role};

use super::{AuthzError, OrgValidator};

/// Authenticated actor identity as seen by the authorization layer.
/// Constructed from JWT claims by the middleware; core checks never look at
/// tokens directly.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub email: String,
    pub site_role: Option<Role>,
}

impl Actor {
    /// Site-admin privilege requires exactly the top site-level role.
    pub fn is_site_admin(&self) -> bool {
        self.site_role == Some(Role::SuperAdmin)
    }
}

/// Site-vs-organization authorization checks.
pub struct AuthzService;

impl AuthzService {
    /// Upstream middleware already gates unauthenticated requests; this check
    /// is kept so callers deeper in the stack cannot skip it.
    pub fn require_authenticated(actor: Option<&Actor>) -> Result<&Actor, AuthzError> {
        actor.ok_or(AuthzError::Unauthenticated)
    }

    pub fn require_site_admin(actor: &Actor) -> Result<(), AuthzError> {
        if !actor.is_site_admin() {
            tracing::warn!(user = %actor.user_id, "site admin check failed");
            return Err(AuthzError::forbidden("site administrator access required"));
        }
        Ok(())
    }

    /// Site admins pass unconditionally; everyone else must hold at least
    /// `min_role` in the organization.
    pub fn require_site_admin_or_org_role(
        actor: &Actor,
        org: &Organization,
        min_role: Role,
    ) -> Result<(), AuthzError> {
        if actor.is_site_admin() {
            return Ok(());
        }
        OrgValidator::new(org).check_member(actor.user_id, min_role)?;
        Ok(())
    }

    /// Privilege-escalation prevention on invitation: a non-site-admin may
    /// only grant roles up to their own role in the organization. Site admins
    /// may invite at any level.
    pub fn authorize_grant(
        actor: &Actor,
        org: &Organization,
        requested: Role,
    ) -> Result<(), AuthzError> {
        if actor.is_site_admin() {
            return Ok(());
        }
        let own_role = org.role_of(actor.user_id);
        if !is_role_at_most(Some(requested), own_role) {
            tracing::warn!(
                user = %actor.user_id,
                org = %org.id,
                requested = %requested,
                "rejected role grant above inviter's own role"
            );
            return Err(AuthzError::forbidden(
                "cannot grant a role above your own role in this organization",
            ));
        }
        Ok(())
    }
}

/// Gate for the starter intake wizard: the account type check applies to
/// everyone (site admins included), the membership check only to
/// non-site-admins.
pub struct StarterAuthzService;

impl StarterAuthzService {
    pub fn authorize(
        actor: Option<&Actor>,
        org: &Organization,
        min_role: Role,
    ) -> Result<(), AuthzError> {
        let actor = AuthzService::require_authenticated(actor)?;
        let validator = OrgValidator::new(org);
        validator.check_type(AccountType::Starter)?;
        if actor.is_site_admin() {
            return Ok(());
        }
        validator.check_member(actor.user_id, min_role)?;
        Ok(())
    }
}
