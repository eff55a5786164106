use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while locating the event array inside an uploaded export.
///
/// These are reported to the user before the engine ever runs. A file whose
/// array is present but whose records are all malformed is *not* an intake
/// error; it aggregates to an empty bundle.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("please upload a JSON file (got {path})")]
    NotJson { path: String },

    #[error("file size {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not find video data in the file")]
    NoEvents,
}
