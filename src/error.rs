use thiserror::Error;

/// Raised while declaring instrumentation, never at call time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot inform on an unnamed method")]
    UndeclaredMethod,

    #[error("unsupported log level: {0:?}")]
    UnsupportedLevel(String),

    #[error("{type_name}::{method} is already informed upon")]
    AlreadyInformed { method: String, type_name: String },

    #[error("{method} logs its result; declare it with a result capture")]
    ResultNotCaptured { method: String },
}

/// Failure on the emit path: building or writing a record.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to write log record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize log value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("logger lock poisoned")]
    Poisoned,
}

/// Why a value could not be put into a record. Never fails the call.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("{0}")]
    Unserializable(#[from] serde_json::Error),

    #[error("accessor panicked")]
    Panicked,
}
