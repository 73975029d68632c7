//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entity::credential::Credential;

// ============================================================================
// Register
// ============================================================================

/// Register request. Absent fields read as empty and fail validation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Status
// ============================================================================

/// Body of every register/login/refresh/logout response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "logged_in")]
    pub status: &'static str,
}

impl StatusResponse {
    pub const REGISTERED: Self = Self {
        status: "registered",
    };
    pub const LOGGED_IN: Self = Self {
        status: "logged_in",
    };
    pub const REFRESHED: Self = Self {
        status: "refreshed",
    };
    pub const LOGGED_OUT: Self = Self {
        status: "logged_out",
    };
}

// ============================================================================
// Profile
// ============================================================================

/// Current user profile
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

impl From<Credential> for ProfileResponse {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.user_id.get(),
            email: credential.email.into_db(),
            full_name: credential.full_name.into_db(),
        }
    }
}
