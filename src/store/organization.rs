use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{AccountType, Membership, NewOrganization, Organization, Role};

use super::StoreError;

/// Persistence seam for organizations and their membership lists. The core
/// authorization code only ever sees fully-resolved `Organization` values;
/// the membership join happens here, not in the validators.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, StoreError>;
    async fn create(
        &self,
        new: NewOrganization,
        initial_admin: Membership,
    ) -> Result<Organization, StoreError>;
    async fn add_membership(&self, org_id: Uuid, membership: Membership) -> Result<(), StoreError>;
    async fn update_membership_role(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), StoreError>;
    async fn remove_membership(&self, org_id: Uuid, user_id: Uuid) -> Result<(), StoreError>;
}

#[derive(FromRow)]
struct OrganizationRow {
    id: Uuid,
    name: String,
    account_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct MembershipRow {
    user_id: Uuid,
    role: String,
    created_at: DateTime<Utc>,
}

impl MembershipRow {
    fn into_membership(self) -> Result<Membership, StoreError> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown role '{}'", self.role)))?;
        Ok(Membership { user_id: self.user_id, role, created_at: self.created_at })
    }
}

pub struct PgOrganizationStore {
    pool: PgPool,
}

impl PgOrganizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn memberships_of(&self, org_id: Uuid) -> Result<Vec<Membership>, StoreError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT user_id, role, created_at
            FROM memberships
            WHERE organization_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MembershipRow::into_membership).collect()
    }
}

#[async_trait]
impl OrganizationStore for PgOrganizationStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, StoreError> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, account_type, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };

        let account_type = AccountType::parse(&row.account_type).ok_or_else(|| {
            StoreError::Corrupt(format!("unknown account type '{}'", row.account_type))
        })?;
        let memberships = self.memberships_of(row.id).await?;

        Ok(Some(Organization {
            id: row.id,
            name: row.name,
            account_type,
            memberships,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    async fn create(
        &self,
        new: NewOrganization,
        initial_admin: Membership,
    ) -> Result<Organization, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            INSERT INTO organizations (id, name, account_type, created_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            RETURNING id, name, account_type, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(new.account_type.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO memberships (organization_id, user_id, role, created_at)
            VALUES ($1, $2, $3, now())
            "#,
        )
        .bind(row.id)
        .bind(initial_admin.user_id)
        .bind(initial_admin.role.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let account_type = AccountType::parse(&row.account_type).ok_or_else(|| {
            StoreError::Corrupt(format!("unknown account type '{}'", row.account_type))
        })?;

        Ok(Organization {
            id: row.id,
            name: row.name,
            account_type,
            memberships: vec![initial_admin],
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn add_membership(&self, org_id: Uuid, membership: Membership) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO memberships (organization_id, user_id, role, created_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (organization_id, user_id) DO NOTHING
            "#,
        )
        .bind(org_id)
        .bind(membership.user_id)
        .bind(membership.role.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(format!(
                "user {} is already a member of organization {}",
                membership.user_id, org_id
            )));
        }
        Ok(())
    }

    async fn update_membership_role(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET role = $3
            WHERE organization_id = $1 AND user_id = $2
            "#,
        )
        .bind(org_id)
        .bind(user_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "membership of user {user_id} in organization {org_id}"
            )));
        }
        Ok(())
    }

    async fn remove_membership(&self, org_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM memberships
            WHERE organization_id = $1 AND user_id = $2
            "#,
        )
        .bind(org_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "membership of user {user_id} in organization {org_id}"
            )));
        }
        Ok(())
    }
}
