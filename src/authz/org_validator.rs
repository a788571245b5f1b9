use uuid::Uuid;

use crate::domain::{is_role_at_least, AccountType, Membership, Organization, Role};

use super::AuthzError;

/// Chainable checks against a fully-resolved organization. Each check either
/// passes, returning the validator for further chaining, or fails with a
/// `Forbidden` error carrying the reason.
///
/// The validator never fetches anything itself; callers resolve the
/// organization (including its membership list) before constructing one.
pub struct OrgValidator<'a> {
    org: &'a Organization,
}

impl<'a> OrgValidator<'a> {
    pub fn new(org: &'a Organization) -> Self {
        Self { org }
    }

    /// The organization's account type must equal the required type exactly;
    /// account types carry no ordering.
    pub fn check_type(&self, required: AccountType) -> Result<&Self, AuthzError> {
        if self.org.account_type != required {
            return Err(AuthzError::forbidden(format!(
                "organization must be of type {}",
                required.as_str()
            )));
        }
        Ok(self)
    }

    /// The user must hold a membership in this organization with a role of at
    /// least `min_role`. A user with no membership record always fails,
    /// regardless of the requested role.
    pub fn check_member(&self, user_id: Uuid, min_role: Role) -> Result<&Self, AuthzError> {
        let membership = self.org.membership_of(user_id).ok_or_else(|| {
            AuthzError::forbidden("user is not a member of this organization")
        })?;

        if !is_role_at_least(Some(membership.role), Some(min_role)) {
            return Err(AuthzError::forbidden(format!(
                "user must be at least role {}",
                min_role.as_str()
            )));
        }
        Ok(self)
    }

    /// Convenience accessor used after a successful `check_member`.
    pub fn membership_of(&self, user_id: Uuid) -> Option<&Membership> {
        self.org.membership_of(user_id)
    }
}
