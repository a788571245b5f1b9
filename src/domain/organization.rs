use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Account tier. Gates which feature set is reachable (e.g. the starter
/// intake wizard), independent of any member's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Starter,
    Premium,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Starter => "starter",
            AccountType::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Option<AccountType> {
        match s {
            "starter" => Some(AccountType::Starter),
            "premium" => Some(AccountType::Premium),
            _ => None,
        }
    }
}

/// Association of a user to an organization, carrying exactly one role.
/// Owned by the organization's membership list; the user is referenced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub account_type: AccountType,
    pub memberships: Vec<Membership>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn membership_of(&self, user_id: Uuid) -> Option<&Membership> {
        self.memberships.iter().find(|m| m.user_id == user_id)
    }

    pub fn role_of(&self, user_id: Uuid) -> Option<Role> {
        self.membership_of(user_id).map(|m| m.role)
    }

    pub fn admin_count(&self) -> usize {
        self.memberships
            .iter()
            .filter(|m| m.role.rank() >= Role::Admin.rank())
            .count()
    }
}

/// Payload for creating an organization; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub account_type: AccountType,
}
