//! Logs method calls when they start and when they finish.
//!
//! A `Registrar` wraps a method of an `Informee` type into an
//! `InformedMethod`. Every call then logs a `starting` record, runs the
//! original, and logs a `done` record, optionally carrying the result and
//! values read from named arguments or registered accessors.

pub mod error;
pub mod informant;
pub mod level;
pub mod logger;
pub mod record;
pub mod registrar;

pub use error::{ConfigError, LogError, ValueError};
pub use informant::{
    AlsoLog, Arguments, Informant, Informee, InstrumentationSpec, NamedArguments, OmitResult,
    ResultCapture, SerializeResult,
};
pub use level::Level;
pub use logger::{
    default_logger, set_default_logger, Logger, RecordingLogger, StreamLogger, TracingLogger,
};
pub use record::LogRecord;
pub use registrar::{InformedMethod, Registrar};
