//! Environment configuration, read once at startup.

/// Process configuration.
///
/// `database_url` absent selects the in-memory store backing;
/// `model_api_key` absent leaves the chat gateway unconfigured. Both are
/// deliberate degraded modes, not errors.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub model_api_key: Option<String>,
}

const DEFAULT_PORT: u16 = 5000;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let port = non_empty("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            database_url: non_empty("DATABASE_URL"),
            model_api_key: non_empty("GOOGLE_API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
        }
    }
}
