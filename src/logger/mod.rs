//! Logger capability consumed by informed methods.
//!
//! A `Logger` exposes one operation per `Level`. Implementors only have to
//! provide `log`; the per-level operations route to it unless overridden.
//!
//! The process-wide default is a `StreamLogger` on stdout, built on first use
//! and replaceable at any time with `set_default_logger`.

pub mod recording;
pub mod stream;
pub mod tracing_logger;

pub use recording::RecordingLogger;
pub use stream::StreamLogger;
pub use tracing_logger::TracingLogger;

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::LogError;
use crate::level::Level;
use crate::record::LogRecord;

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, record: &LogRecord) -> Result<(), LogError>;

    fn debug(&self, record: &LogRecord) -> Result<(), LogError> {
        self.log(Level::Debug, record)
    }

    fn info(&self, record: &LogRecord) -> Result<(), LogError> {
        self.log(Level::Info, record)
    }

    fn warn(&self, record: &LogRecord) -> Result<(), LogError> {
        self.log(Level::Warn, record)
    }

    fn error(&self, record: &LogRecord) -> Result<(), LogError> {
        self.log(Level::Error, record)
    }

    fn fatal(&self, record: &LogRecord) -> Result<(), LogError> {
        self.log(Level::Fatal, record)
    }

    fn unknown(&self, record: &LogRecord) -> Result<(), LogError> {
        self.log(Level::Unknown, record)
    }
}

/// Sends `record` through the operation matching `level`.
pub fn emit(logger: &dyn Logger, level: Level, record: &LogRecord) -> Result<(), LogError> {
    match level {
        Level::Debug => logger.debug(record),
        Level::Info => logger.info(record),
        Level::Warn => logger.warn(record),
        Level::Error => logger.error(record),
        Level::Fatal => logger.fatal(record),
        Level::Unknown => logger.unknown(record),
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, record: &LogRecord) -> Result<(), LogError> {
        (**self).log(level, record)
    }

    fn debug(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).debug(record)
    }

    fn info(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).info(record)
    }

    fn warn(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).warn(record)
    }

    fn error(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).error(record)
    }

    fn fatal(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).fatal(record)
    }

    fn unknown(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).unknown(record)
    }
}

static DEFAULT_LOGGER: RwLock<Option<Arc<dyn Logger>>> = RwLock::new(None);

/// Returns the process-wide logger, creating a stdout `StreamLogger` if none was set.
pub fn default_logger() -> Arc<dyn Logger> {
    {
        let current = DEFAULT_LOGGER.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(logger) = current.as_ref() {
            return Arc::clone(logger);
        }
    }

    // Re-checked under the write lock so racing first uses agree on one logger.
    let mut slot = DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    let logger = slot.get_or_insert_with(|| {
        tracing::debug!("no default logger set, logging informed calls to stdout");
        Arc::new(StreamLogger::stdout()) as Arc<dyn Logger>
    });
    Arc::clone(logger)
}

/// Replaces the process-wide logger and returns what it was given.
pub fn set_default_logger(logger: Arc<dyn Logger>) -> Arc<dyn Logger> {
    let mut slot = DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::clone(&logger));
    logger
}
