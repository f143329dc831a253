//! Wire types for the auth endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthRejection;
use crate::store::Account;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
}

/// Public part of an account returned to the client: everything except the
/// password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            phone_number: account.phone_number,
        }
    }
}

/// Outcome of a login or signup attempt. `user` and `token` are present
/// exactly when `success` is true.
#[derive(Debug, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthOutcome {
    pub fn granted(message: &str, user: PublicAccount, token: String) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            user: Some(user),
            token: Some(token),
        }
    }

    pub fn denied(rejection: AuthRejection) -> Self {
        Self {
            success: false,
            message: rejection.to_string(),
            user: None,
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_outcome_serializes_user_and_token() {
        let outcome = AuthOutcome::granted(
            "Login successful",
            PublicAccount {
                id: Uuid::new_v4(),
                email: "priya@example.com".to_string(),
                first_name: "Priya".to_string(),
                last_name: "Menon".to_string(),
                phone_number: Some("9876543210".to_string()),
            },
            "session-token".to_string(),
        );

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["user"]["firstName"], "Priya");
        assert_eq!(json["user"]["phoneNumber"], "9876543210");
        assert_eq!(json["token"], "session-token");
    }

    #[test]
    fn denied_outcome_omits_user_and_token() {
        let outcome = AuthOutcome::denied(AuthRejection::UnknownEmail);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User not found");
        assert!(json.get("user").is_none());
        assert!(json.get("token").is_none());
    }

    #[test]
    fn signup_request_uses_camel_case_fields() {
        let body = r#"{
            "email": "priya@example.com",
            "password": "hunter2!",
            "firstName": "Priya",
            "lastName": "Menon",
            "phoneNumber": null
        }"#;

        let request: SignupRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.first_name, "Priya");
        assert_eq!(request.last_name, "Menon");
        assert!(request.phone_number.is_none());
    }
}
