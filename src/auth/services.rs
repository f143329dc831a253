use std::sync::Arc;

use crate::auth::dto::{AuthOutcome, LoginRequest, SignupRequest};
use crate::auth::error::{AuthError, AuthRejection};
use crate::auth::{password, token};
use crate::store::{CredentialStore, NewAccount, StoreError};

/// Single-shot authentication decisions over an injected credential store.
///
/// Business denials come back as failed `AuthOutcome`s with their fixed
/// messages; only unexpected store or hashing failures surface as `Err`.
/// Nothing here retries and nothing here logs.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Verify credentials and issue a session token.
    ///
    /// Check order is fixed: unknown email, then password, then account
    /// state. An inactive account with a wrong password reports the wrong
    /// password.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthOutcome, AuthError> {
        let Some(account) = self.store.find_by_email(&request.email).await? else {
            return Ok(AuthOutcome::denied(AuthRejection::UnknownEmail));
        };

        let ok = password::verify_password(&request.password, &account.password_hash)
            .map_err(AuthError::Hash)?;
        if !ok {
            return Ok(AuthOutcome::denied(AuthRejection::WrongPassword));
        }

        if !account.is_active {
            return Ok(AuthOutcome::denied(AuthRejection::InactiveAccount));
        }

        let session = token::issue();
        Ok(AuthOutcome::granted("Login successful", account.into(), session))
    }

    /// Register a new account, activate it, and issue a session token.
    ///
    /// Email uniqueness is checked before phone uniqueness. The save can
    /// still lose a race after both pre-checks pass; the store reports which
    /// key collided and the denial is the same one the pre-check would have
    /// given.
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthOutcome, AuthError> {
        if self.store.exists_by_email(&request.email).await? {
            return Ok(AuthOutcome::denied(AuthRejection::EmailTaken));
        }

        if let Some(phone) = &request.phone_number {
            if self.store.exists_by_phone_number(phone).await? {
                return Ok(AuthOutcome::denied(AuthRejection::PhoneTaken));
            }
        }

        let password_hash = password::hash_password(&request.password).map_err(AuthError::Hash)?;
        let account = NewAccount {
            email: request.email,
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            phone_number: request.phone_number,
            is_active: true,
        };

        let stored = match self.store.save(account).await {
            Ok(stored) => stored,
            Err(StoreError::DuplicateEmail) => {
                return Ok(AuthOutcome::denied(AuthRejection::EmailTaken));
            }
            Err(StoreError::DuplicatePhone) => {
                return Ok(AuthOutcome::denied(AuthRejection::PhoneTaken));
            }
            Err(err) => return Err(err.into()),
        };

        let session = token::issue();
        Ok(AuthOutcome::granted("Signup successful", stored.into(), session))
    }
}
