//! PostgreSQL credential store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Account, CredentialStore, NewAccount, StoreError};

/// Store backed by the `accounts` table.
///
/// Uniqueness is enforced by the named constraints created in
/// `migrations/0001_create_accounts.sql`; a unique violation on insert comes
/// back as the matching `Duplicate*` variant.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, first_name, last_name,
                   phone_number, is_active, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(account)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)"#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(exists)
    }

    async fn exists_by_phone_number(&self, phone: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE phone_number = $1)"#,
        )
        .bind(phone)
        .fetch_one(&self.db)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(exists)
    }

    async fn save(&self, account: NewAccount) -> Result<Account, StoreError> {
        let stored = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, first_name, last_name,
                                  phone_number, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, first_name, last_name,
                      phone_number, is_active, created_at
            "#,
        )
        .bind(account.email)
        .bind(account.password_hash)
        .bind(account.first_name)
        .bind(account.last_name)
        .bind(account.phone_number)
        .bind(account.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(map_save_error)?;

        Ok(stored)
    }
}

/// A Postgres unique violation names the constraint that tripped; anything
/// else stays an opaque backend failure.
fn map_save_error(err: sqlx::Error) -> StoreError {
    let violated = err
        .as_database_error()
        .filter(|db| db.code().as_deref() == Some("23505"))
        .and_then(|db| db.constraint())
        .map(str::to_owned);

    match violated.as_deref() {
        Some("accounts_email_key") => StoreError::DuplicateEmail,
        Some("accounts_phone_number_key") => StoreError::DuplicatePhone,
        _ => StoreError::Backend(err.into()),
    }
}
