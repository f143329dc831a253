//! Account records and the credential store seam.
//!
//! Uniqueness lives here: `save` is atomic per unique key, so of any set of
//! concurrent saves sharing an email or phone number exactly one wins and
//! the rest come back as the matching `Duplicate*` error.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A registered account as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string. Never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

/// Insert form of an account. `id` and `created_at` are assigned by the
/// store on save.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
}

/// Storage failures.
///
/// The duplicate variants keep a save that lost a race on a unique key
/// distinguishable from the store being broken.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("phone number already registered")]
    DuplicatePhone,
    #[error("credential store failure: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Persistence boundary for accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by exact email. A miss is `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn exists_by_phone_number(&self, phone: &str) -> Result<bool, StoreError>;

    /// Persist a new account and return the stored form.
    ///
    /// Accounts without a phone number never collide with each other.
    async fn save(&self, account: NewAccount) -> Result<Account, StoreError>;
}
