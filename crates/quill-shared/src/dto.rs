//! Data Transfer Objects - request/response types for the API.
//!
//! Request types list their fields explicitly. Anything else a client sends
//! (an `author`, `id` or `created_at` on a post, say) is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of the refresh and logout endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// An account's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Access and refresh token pair issued on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Registration result: the new account plus a token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub account: AccountResponse,
    #[serde(flatten)]
    pub tokens: AuthResponse,
}

/// Fresh access token returned by the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create or fully replace a post. Missing fields arrive empty and fail
/// validation as required fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Partial post update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as shown to API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: Uuid,
    pub author_name: String,
}

/// Query string of the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    pub search: Option<String>,
}
