//! User and API-key models

use crate::decode::FlexTime;
use serde::{Deserialize, Serialize};

/// An account user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User name
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the user is an account administrator
    #[serde(default)]
    pub administrator: Option<bool>,
    /// Whether this is the calling user
    #[serde(default)]
    pub me: Option<bool>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
}

/// Envelope for `GET /v3/user/list`
#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    /// The account's users
    pub users: Vec<User>,
}

/// Envelope for `GET /v3/user/apikey/list/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyList {
    /// The user's API keys
    pub apikeys: Vec<String>,
}
