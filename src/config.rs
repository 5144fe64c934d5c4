use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";
const DEFAULT_PRODUCTHUNT_URL: &str = "https://api.producthunt.com/v2/api/graphql";
const DEFAULT_MONGODB_DATABASE: &str = "happyaxzora";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
const MAX_UPSTREAM_TIMEOUT_SECS: u64 = 120;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sentry_dsn: Option<String>,
    pub environment: String,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub llm_model: String,
    pub producthunt_token: Option<String>,
    pub producthunt_url: String,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub upstream_timeout: Duration,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a Config from any key lookup (as values would come from env vars).
    /// Used directly in tests to avoid mutating process-global environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let upstream_timeout_secs = get("UPSTREAM_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS)
            .clamp(1, MAX_UPSTREAM_TIMEOUT_SECS);

        Config {
            port,
            sentry_dsn: get("SENTRY_DSN"),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "local".to_string()),
            groq_api_key: get("GROQ_API_KEY"),
            groq_base_url: get("GROQ_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            producthunt_token: get("PRODUCTHUNT_DEVELOPER_TOKEN"),
            producthunt_url: get("PRODUCTHUNT_API_URL")
                .unwrap_or_else(|| DEFAULT_PRODUCTHUNT_URL.to_string()),
            mongodb_uri: get("MONGODB_URI"),
            mongodb_database: get("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
        }
    }
}
