//! API DTOs (Data Transfer Objects)
//!
//! Missing fields deserialize to their zero value so that handler
//! validation, not the JSON extractor, decides what is required.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub app_id: i32,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Is Admin
// ============================================================================

/// Is admin request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IsAdminRequest {
    pub user_id: i64,
}

/// Is admin response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.c","password":"pw","appId":3}"#).unwrap();
        assert_eq!(req.app_id, 3);

        let json = serde_json::to_string(&IsAdminResponse { is_admin: true }).unwrap();
        assert_eq!(json, r#"{"isAdmin":true}"#);
    }

    #[test]
    fn test_missing_fields_default() {
        let req: IsAdminRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_id, 0);
    }

    #[test]
    fn test_debug_hides_password() {
        let req = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", req).contains("hunter2"));
    }
}
