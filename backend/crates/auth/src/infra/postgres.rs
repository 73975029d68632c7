//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;

use crate::domain::entity::credential::{Credential, NewCredential};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    email::Email, full_name::FullName, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Emails are stored already lower-cased by [`Email::new`], so lookups
/// compare the column directly instead of relying on the database's `lower()`.
impl CredentialRepository for PgCredentialRepository {
    async fn create(&self, credential: &NewCredential) -> AuthResult<UserId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                email,
                password,
                full_name
            ) VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(credential.email.as_str())
        .bind(credential.password.as_phc_string())
        .bind(credential.full_name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(UserId::from_raw(id))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                id,
                email,
                password,
                full_name,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialRow::into_credential))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                id,
                email,
                password,
                full_name,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialRow::into_credential))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password: String,
    full_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> Credential {
        Credential {
            user_id: UserId::from_raw(self.id),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password),
            full_name: FullName::from_db(self.full_name),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
