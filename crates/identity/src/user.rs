//! User model and session types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agrovault_store::Document;

/// Stored user record. The `password` field holds the Argon2id hash, never
/// plaintext, and never leaves the service (see [`UserProfile`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Caller-facing view of a user: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Result of a signup or login: the profile plus a fresh opaque token.
///
/// Tokens are unique per issuance and carry no cryptographic guarantee;
/// they are not verified on later requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

impl Session {
    pub fn issue(user: &User) -> Self {
        Self {
            user: UserProfile::from(user),
            token: format!("token-{}-{}", user.id, Uuid::new_v4()),
        }
    }
}
