use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use super::Logger;
use crate::error::LogError;
use crate::level::Level;
use crate::record::LogRecord;

/// Writes each record as one text line to a stream.
///
/// Line format: `I, [#4242]  INFO -- : {"method":"do_something",...}`
#[derive(Debug)]
pub struct StreamLogger<W: Write + Send> {
    out: Mutex<W>,
    pid: u32,
}

impl StreamLogger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> StreamLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            pid: std::process::id(),
        }
    }

    pub fn into_inner(self) -> Result<W, LogError> {
        self.out.into_inner().map_err(|_| LogError::Poisoned)
    }

    fn format_line(&self, level: Level, record: &LogRecord) -> Result<String, LogError> {
        let json = serde_json::to_string(record)?;
        Ok(format!(
            "{}, [#{}] {:>5} -- : {}",
            level.initial(),
            self.pid,
            level.label(),
            json
        ))
    }
}

impl<W: Write + Send> Logger for StreamLogger<W> {
    fn log(&self, level: Level, record: &LogRecord) -> Result<(), LogError> {
        let line = self.format_line(level, record)?;
        let mut out = self.out.lock().map_err(|_| LogError::Poisoned)?;
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_line_per_record() {
        let logger = StreamLogger::new(Vec::new());
        let mut record = LogRecord::new();
        record.insert("method", "do_something");
        record.insert("status", "starting");

        logger.info(&record).unwrap();
        logger.fatal(&record).unwrap();

        let text = String::from_utf8(logger.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("I, [#"));
        let json = r#"{"method":"do_something","status":"starting"}"#;
        assert!(lines[0].ends_with(&format!(" INFO -- : {json}")));
        assert!(lines[1].starts_with("F, [#"));
        assert!(lines[1].contains("FATAL -- : "));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let logger = StreamLogger::new(BrokenPipe);
        let err = logger.warn(&LogRecord::new()).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
    }
}
