//! Auth DTOs shared between the client and its tests

use crate::models::User;
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Current user response (`GET /auth/me`)
pub type CurrentUserResponse = User;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_accepts_token_alias() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert!(resp.user.is_none());
    }
}
