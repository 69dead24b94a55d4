use super::Logger;
use crate::error::LogError;
use crate::level::Level;
use crate::record::LogRecord;

/// Forwards records into `tracing` as JSON text.
///
/// `tracing` has no fatal or unknown level; both go out as ERROR with the
/// original severity kept in the `severity` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, record: &LogRecord) -> Result<(), LogError> {
        let json = serde_json::to_string(record)?;
        let severity = level.as_str();
        match level {
            Level::Debug => tracing::debug!(target: "informed", severity, "{}", json),
            Level::Info => tracing::info!(target: "informed", severity, "{}", json),
            Level::Warn => tracing::warn!(target: "informed", severity, "{}", json),
            Level::Error | Level::Fatal | Level::Unknown => {
                tracing::error!(target: "informed", severity, "{}", json)
            }
        }
        Ok(())
    }
}
