use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ConfigError, LogError};
use crate::informant::{
    AccessorTable, AlsoLog, Informant, Informee, InstrumentationSpec, NamedArguments, OmitResult,
    ResultCapture, SerializeResult,
};
use crate::level::Level;
use crate::logger::Logger;

/// Declares which methods of `T` are informed upon.
///
/// It hands out an `InformedMethod` per method and owns the accessor table
/// that `also_log.values` reads from.
///
/// The duplicate guard is per registrar: the same method cannot be informed
/// upon twice through one `Registrar`, but a second `Registrar::<T>` knows
/// nothing of the first. Keep one registrar per type.
///
/// Methods declared with `inform_on*` put no bound on their return type and
/// never log it. Use `inform_on_with_result*` to log the result; that needs
/// the return type to be `Serialize`.
pub struct Registrar<T: ?Sized> {
    informed: HashSet<String>,
    accessors: Arc<RwLock<AccessorTable<T>>>,
}

impl<T: Informee + ?Sized> Registrar<T> {
    pub fn new() -> Self {
        Self {
            informed: HashSet::new(),
            accessors: Arc::new(RwLock::new(AccessorTable::new())),
        }
    }

    /// Makes a zero-argument accessor loggable under `name`.
    ///
    /// Accessors are looked up per call, so one registered after `inform_on`
    /// is still picked up.
    pub fn accessor<V, F>(&mut self, name: impl Into<String>, accessor: F) -> &mut Self
    where
        T: 'static,
        V: Serialize,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.accessors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, accessor);
        self
    }

    pub fn inform_on<F>(
        &mut self,
        method: impl Into<String>,
        original: F,
        level: Level,
        also_log: AlsoLog,
    ) -> Result<InformedMethod<T, F>, ConfigError> {
        self.inform_on_spec(InstrumentationSpec::new(method, level, also_log), original)
    }

    /// Like `inform_on`, with the level given as text (`"info"`, `"warning"`, ...).
    pub fn inform_on_at<F>(
        &mut self,
        method: impl Into<String>,
        original: F,
        level: &str,
        also_log: Option<AlsoLog>,
    ) -> Result<InformedMethod<T, F>, ConfigError> {
        let level: Level = level.parse()?;
        self.inform_on(method, original, level, also_log.unwrap_or_default())
    }

    /// Rejects `also_log.result = true`: there is no way to log the result.
    pub fn inform_on_spec<F>(
        &mut self,
        spec: InstrumentationSpec,
        original: F,
    ) -> Result<InformedMethod<T, F>, ConfigError> {
        if spec.also_log.result {
            return Err(ConfigError::ResultNotCaptured {
                method: spec.method,
            });
        }
        self.declare(spec, original, OmitResult)
    }

    /// Like `inform_on`, and the done record carries the result.
    pub fn inform_on_with_result<F>(
        &mut self,
        method: impl Into<String>,
        original: F,
        level: Level,
        also_log: AlsoLog,
    ) -> Result<InformedMethod<T, F, SerializeResult>, ConfigError> {
        let also_log = AlsoLog {
            result: true,
            ..also_log
        };
        self.inform_on_spec_with_result(InstrumentationSpec::new(method, level, also_log), original)
    }

    /// Declares from an `InstrumentationSpec`; its `also_log.result` is honored.
    pub fn inform_on_spec_with_result<F>(
        &mut self,
        spec: InstrumentationSpec,
        original: F,
    ) -> Result<InformedMethod<T, F, SerializeResult>, ConfigError> {
        self.declare(spec, original, SerializeResult)
    }

    fn declare<F, C>(
        &mut self,
        spec: InstrumentationSpec,
        original: F,
        capture: C,
    ) -> Result<InformedMethod<T, F, C>, ConfigError> {
        if spec.method.trim().is_empty() {
            return Err(ConfigError::UndeclaredMethod);
        }
        if self.informed.contains(&spec.method) {
            return Err(ConfigError::AlreadyInformed {
                method: spec.method,
                type_name: std::any::type_name::<T>().to_string(),
            });
        }

        let target_type = std::any::type_name::<T>();
        tracing::debug!(
            target_type,
            method = %spec.method,
            level = %spec.level,
            "informing on method"
        );
        self.informed.insert(spec.method.clone());

        Ok(InformedMethod {
            informant: Informant::new(spec, Arc::clone(&self.accessors)),
            capture,
            original,
        })
    }

    pub fn is_informed(&self, method: &str) -> bool {
        self.informed.contains(method)
    }
}

impl<T: Informee + ?Sized> Default for Registrar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Registrar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar")
            .field("target", &std::any::type_name::<T>())
            .field("informed", &self.informed)
            .finish()
    }
}

/// An informed method: same call contract as `original`, with logging around it.
pub struct InformedMethod<T: ?Sized, F, C = OmitResult> {
    informant: Informant<T>,
    capture: C,
    original: F,
}

impl<T: Informee + ?Sized, F, C> InformedMethod<T, F, C> {
    /// Calls the method on `target`, logging to `target.logger()`.
    pub fn call<A, R, E>(&self, target: &T, arguments: &A) -> Result<R, E>
    where
        A: NamedArguments + ?Sized,
        E: From<LogError>,
        C: ResultCapture<R>,
        F: Fn(&T, &A) -> Result<R, E>,
    {
        let logger = target.logger();
        self.call_with(target, logger.as_ref(), arguments)
    }

    /// Calls the method on `target`, logging to `logger`.
    pub fn call_with<A, R, E>(
        &self,
        target: &T,
        logger: &dyn Logger,
        arguments: &A,
    ) -> Result<R, E>
    where
        A: NamedArguments + ?Sized,
        E: From<LogError>,
        C: ResultCapture<R>,
        F: Fn(&T, &A) -> Result<R, E>,
    {
        self.informant
            .inform_on(target, logger, arguments, &self.capture, &self.original)
    }

    /// The unwrapped method; calling it logs nothing.
    pub fn original(&self) -> &F {
        &self.original
    }

    pub fn informant(&self) -> &Informant<T> {
        &self.informant
    }
}

impl<T: ?Sized, F, C> fmt::Debug for InformedMethod<T, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InformedMethod")
            .field("target", &std::any::type_name::<T>())
            .field("spec", self.informant.spec())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl Informee for Widget {}

    fn spin(_: &Widget, _: &()) -> Result<&'static str, LogError> {
        Ok("spun")
    }

    #[test]
    fn test_rejects_double_instrumentation() {
        let mut registrar = Registrar::<Widget>::new();
        registrar
            .inform_on("spin", spin, Level::Info, AlsoLog::nothing())
            .unwrap();

        let err = registrar
            .inform_on_with_result("spin", spin, Level::Debug, AlsoLog::nothing())
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyInformed { ref method, .. } if method == "spin"));
        assert!(registrar.is_informed("spin"));
    }

    #[test]
    fn test_rejects_unnamed_method() {
        let mut registrar = Registrar::<Widget>::new();
        let err = registrar
            .inform_on("  ", spin, Level::Info, AlsoLog::nothing())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UndeclaredMethod));
        assert!(!registrar.is_informed("  "));
    }

    #[test]
    fn test_rejects_unsupported_level_text() {
        let mut registrar = Registrar::<Widget>::new();
        let err = registrar.inform_on_at("spin", spin, "loud", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLevel(_)));
        assert!(!registrar.is_informed("spin"));

        let informed = registrar.inform_on_at("spin", spin, "warning", None).unwrap();
        assert_eq!(informed.informant().level(), Level::Warn);
        assert_eq!(informed.informant().also_log(), &AlsoLog::nothing());
    }

    #[test]
    fn test_result_logging_needs_a_capture() {
        let mut registrar = Registrar::<Widget>::new();
        let err = registrar
            .inform_on("spin", spin, Level::Info, AlsoLog::result())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ResultNotCaptured { ref method } if method == "spin"));
        assert!(!registrar.is_informed("spin"));

        let informed = registrar
            .inform_on_with_result("spin", spin, Level::Info, AlsoLog::nothing())
            .unwrap();
        assert!(informed.informant().also_log().result);
    }
}
