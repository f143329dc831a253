//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Business denials. The `Display` form of each variant is the exact
/// message callers see in a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("User not found")]
    UnknownEmail,
    #[error("Invalid password")]
    WrongPassword,
    #[error("User account is inactive")]
    InactiveAccount,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Phone number already exists")]
    PhoneTaken,
}

/// Failures the authenticator does not turn into an outcome. The boundary
/// answers these with a generic server error.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("password hashing failed: {0}")]
    Hash(#[source] anyhow::Error),
}
