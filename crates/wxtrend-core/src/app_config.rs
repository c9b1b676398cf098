use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Primary store connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Fallback store connection string.
    pub secondary_database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub locations_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub collector_url: String,
    pub collector_timeout_secs: u64,
    pub collector_user_agent: String,
    pub collector_max_retries: u32,
    pub collector_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("locations_path", &self.locations_path)
            .field("database_url", &"[redacted]")
            .field("secondary_database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("collector_url", &self.collector_url)
            .field("collector_timeout_secs", &self.collector_timeout_secs)
            .field("collector_user_agent", &self.collector_user_agent)
            .field("collector_max_retries", &self.collector_max_retries)
            .field(
                "collector_retry_backoff_base_ms",
                &self.collector_retry_backoff_base_ms,
            )
            .finish()
    }
}
