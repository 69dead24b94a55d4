//! Runs one informed call: starting record, original method, done record.
//!
//! # INVARIANTS
//! - A successful call logs exactly one starting and one done record, in that
//!   order, on one logger, at the configured level.
//! - A failed call logs the starting record only. The error is returned as is.
//! - The value returned is the value the original returned. It is only
//!   serialized for the record, and only when result capture was declared.
//! - Only sink failures can fail a call that succeeded; values that cannot be
//!   logged become placeholders.

pub mod accessor;
pub mod arguments;
pub mod capture;
pub mod config;
pub mod message;

pub use accessor::AccessorTable;
pub use arguments::{Arguments, NamedArguments};
pub use capture::{OmitResult, ResultCapture, SerializeResult};
pub use config::{AlsoLog, InstrumentationSpec};
pub use message::{CallContext, DoneMessage, StartingMessage};

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::LogError;
use crate::level::Level;
use crate::logger::{self, Logger};
use crate::record::LogRecord;

/// A type whose methods can be informed upon.
pub trait Informee {
    /// Logger the records of this object's calls go to.
    fn logger(&self) -> Arc<dyn Logger> {
        logger::default_logger()
    }

    /// Value of the `class` key.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

pub struct Informant<T: ?Sized> {
    spec: InstrumentationSpec,
    accessors: Arc<RwLock<AccessorTable<T>>>,
}

impl<T: ?Sized> Informant<T> {
    pub fn new(spec: InstrumentationSpec, accessors: Arc<RwLock<AccessorTable<T>>>) -> Self {
        Self { spec, accessors }
    }

    /// Informant with no accessors: `values` can only come from named arguments.
    pub fn standalone(spec: InstrumentationSpec) -> Self {
        Self::new(spec, Arc::new(RwLock::new(AccessorTable::new())))
    }

    pub fn spec(&self) -> &InstrumentationSpec {
        &self.spec
    }

    pub fn method(&self) -> &str {
        &self.spec.method
    }

    pub fn level(&self) -> Level {
        self.spec.level
    }

    pub fn also_log(&self) -> &AlsoLog {
        &self.spec.also_log
    }
}

impl<T: ?Sized> fmt::Debug for Informant<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Informant").field("spec", &self.spec).finish()
    }
}

impl<T: Informee + ?Sized> Informant<T> {
    pub fn inform_on<A, R, E, C, F>(
        &self,
        target: &T,
        logger: &dyn Logger,
        arguments: &A,
        capture: &C,
        original: F,
    ) -> Result<R, E>
    where
        A: NamedArguments + ?Sized,
        E: From<LogError>,
        C: ResultCapture<R> + ?Sized,
        F: FnOnce(&T, &A) -> Result<R, E>,
    {
        let starting = {
            let accessors = self.accessors.read().unwrap_or_else(PoisonError::into_inner);
            let context = self.context(target, arguments, &accessors);
            StartingMessage::new(&context).to_record()
        };
        self.log(logger, &starting)?;

        let result = original(target, arguments)?;

        // Accessors are read again: the done record reflects state after the call.
        let done = {
            let accessors = self.accessors.read().unwrap_or_else(PoisonError::into_inner);
            let context = self.context(target, arguments, &accessors);
            DoneMessage::new(&context, capture.capture(&result)).to_record()
        };
        self.log(logger, &done)?;

        Ok(result)
    }

    fn context<'a, A: ?Sized>(
        &'a self,
        target: &'a T,
        arguments: &'a A,
        accessors: &'a AccessorTable<T>,
    ) -> CallContext<'a, T, A> {
        CallContext {
            target,
            arguments,
            spec: &self.spec,
            accessors,
        }
    }

    fn log(&self, logger: &dyn Logger, record: &LogRecord) -> Result<(), LogError> {
        tracing::trace!(method = %self.spec.method, level = %self.spec.level, "informing");
        logger::emit(logger, self.spec.level, record)
    }
}
