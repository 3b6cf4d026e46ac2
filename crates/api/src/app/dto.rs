//! Request DTOs.
//!
//! Fields default rather than hard-fail at the extractor so the services can
//! report their own validation messages (missing name/email/password are a
//! 400 with a readable body, not a deserialization error).

use serde::Deserialize;

use agrovault_assistant::ChatTurn;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    /// Missing password is treated as the empty string.
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeverityQuery {
    pub severity: Option<String>,
}
