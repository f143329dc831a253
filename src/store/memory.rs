//! In-memory credential store used by tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Account, CredentialStore, NewAccount, StoreError};

/// Mutex-guarded account table with email and phone indexes.
///
/// `save` checks and inserts under a single lock acquisition, which is what
/// resolves racing saves to one winner. The lock is never held across an
/// `.await`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    accounts: HashMap<Uuid, Account>,
    by_email: HashMap<String, Uuid>,
    by_phone: HashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let tables = self.inner.lock().expect("account table mutex poisoned");
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.accounts.get(id))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.inner.lock().expect("account table mutex poisoned");
        Ok(tables.by_email.contains_key(email))
    }

    async fn exists_by_phone_number(&self, phone: &str) -> Result<bool, StoreError> {
        let tables = self.inner.lock().expect("account table mutex poisoned");
        Ok(tables.by_phone.contains_key(phone))
    }

    async fn save(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut tables = self.inner.lock().expect("account table mutex poisoned");

        if tables.by_email.contains_key(&account.email) {
            return Err(StoreError::DuplicateEmail);
        }
        if let Some(phone) = &account.phone_number {
            if tables.by_phone.contains_key(phone) {
                return Err(StoreError::DuplicatePhone);
            }
        }

        let stored = Account {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: account.password_hash,
            first_name: account.first_name,
            last_name: account.last_name,
            phone_number: account.phone_number,
            is_active: account.is_active,
            created_at: OffsetDateTime::now_utc(),
        };

        tables.by_email.insert(stored.email.clone(), stored.id);
        if let Some(phone) = &stored.phone_number {
            tables.by_phone.insert(phone.clone(), stored.id);
        }
        tables.accounts.insert(stored.id, stored.clone());

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_account(email: &str, phone: Option<&str>) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Menon".to_string(),
            phone_number: phone.map(str::to_string),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn save_then_find_by_email() {
        let store = MemoryStore::new();
        let stored = store
            .save(new_account("priya@example.com", Some("9876543210")))
            .await
            .unwrap();

        let found = store.find_by_email("priya@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert_eq!(found.email, "priya@example.com");
        assert!(found.is_active);

        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exists_checks_match_saved_keys() {
        let store = MemoryStore::new();
        store
            .save(new_account("priya@example.com", Some("9876543210")))
            .await
            .unwrap();

        assert!(store.exists_by_email("priya@example.com").await.unwrap());
        assert!(!store.exists_by_email("other@example.com").await.unwrap());
        assert!(store.exists_by_phone_number("9876543210").await.unwrap());
        assert!(!store.exists_by_phone_number("0000000000").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.save(new_account("priya@example.com", None)).await.unwrap();

        let err = store
            .save(new_account("priya@example.com", Some("9876543210")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected() {
        let store = MemoryStore::new();
        store
            .save(new_account("priya@example.com", Some("9876543210")))
            .await
            .unwrap();

        let err = store
            .save(new_account("arjun@example.com", Some("9876543210")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePhone));
    }

    #[tokio::test]
    async fn missing_phone_numbers_never_collide() {
        let store = MemoryStore::new();
        store.save(new_account("priya@example.com", None)).await.unwrap();
        store.save(new_account("arjun@example.com", None)).await.unwrap();

        assert!(store.exists_by_email("priya@example.com").await.unwrap());
        assert!(store.exists_by_email("arjun@example.com").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_saves_on_one_email_have_one_winner() {
        let store = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save(new_account("race@example.com", None)).await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(err) => assert!(matches!(err, StoreError::DuplicateEmail)),
            }
        }
        assert_eq!(wins, 1);
    }
}
