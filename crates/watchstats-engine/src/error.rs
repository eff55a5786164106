use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Aggregation panicked; the message is whatever the panic carried.
    #[error("aggregation aborted: {message}")]
    Aborted { message: String },

    #[error("invalid UTC offset of {minutes} minutes (must be less than a day)")]
    InvalidUtcOffset { minutes: i32 },
}
