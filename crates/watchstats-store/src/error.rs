use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would push the store past its byte quota. Nothing was written.
    #[error(
        "storage quota exceeded writing {key}: needs {required} bytes, {available} available"
    )]
    CapacityExceeded {
        key: String,
        required: u64,
        available: u64,
    },

    #[error("invalid storage key {key:?}")]
    InvalidKey { key: String },

    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
