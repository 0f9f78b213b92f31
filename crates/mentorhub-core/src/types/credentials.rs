//! Session credential bundle.

use serde::{Deserialize, Serialize};

use super::user_type::UserType;

/// Everything the client holds for a logged-in user.
///
/// Deserializes directly from the login response body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    /// Bearer credential attached to every request.
    pub access_token: String,
    /// Credential exchanged for a new access token.
    pub refresh_token: String,
    /// Identifier of the logged-in user.
    pub user_id: String,
    /// Portal the user belongs to.
    pub user_type: UserType,
}

impl std::fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_token", &"****")
            .field("refresh_token", &"****")
            .field("user_id", &self.user_id)
            .field("user_type", &self.user_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_tokens() {
        let creds = SessionCredentials {
            access_token: "secret-access".to_string(),
            refresh_token: "secret-refresh".to_string(),
            user_id: "u-1".to_string(),
            user_type: UserType::Mentor,
        };
        let shown = format!("{creds:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("u-1"));
    }

    #[test]
    fn test_deserialize_login_body() {
        let body = serde_json::json!({
            "accessToken": "a",
            "refreshToken": "r",
            "userId": "42",
            "userType": "Admin",
            "name": "ignored"
        });
        let creds: SessionCredentials = serde_json::from_value(body).unwrap();
        assert_eq!(creds.user_type, UserType::Admin);
        assert_eq!(creds.user_id, "42");
    }
}
