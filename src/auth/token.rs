use uuid::Uuid;

/// Issue a fresh opaque session token.
///
/// The token is a bare random identifier. Nothing in this service parses,
/// stores, or verifies it afterwards.
pub fn issue() -> String {
    Uuid::new_v4().to_string()
}
