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

impl Environment {
    /// Log filter used when `WATCHSTATS_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory the file-backed bundle store writes into.
    pub store_dir: PathBuf,
    /// Byte quota for the bundle store, keys and values combined.
    pub store_capacity_bytes: u64,
    /// Uploads larger than this are rejected before parsing.
    pub max_upload_bytes: u64,
    /// Fixed offset applied to every time-bucketed view. `0` means UTC.
    pub utc_offset_minutes: i32,
    /// Fall back to the last record as "first video" when nothing is dated.
    pub legacy_first_event: bool,
}
