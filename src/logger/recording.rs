use std::sync::{Mutex, PoisonError};

use super::Logger;
use crate::error::LogError;
use crate::level::Level;
use crate::record::LogRecord;

/// Keeps every record in memory, in emission order. Meant for tests.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(Level, LogRecord)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records logged at `level`, oldest first.
    pub fn records(&self, level: Level) -> Vec<LogRecord> {
        self.lock()
            .iter()
            .filter(|(logged_at, _)| *logged_at == level)
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// All records with their level, oldest first.
    pub fn entries(&self) -> Vec<(Level, LogRecord)> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, LogRecord)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, record: &LogRecord) -> Result<(), LogError> {
        self.lock().push((level, record.clone()));
        Ok(())
    }
}
