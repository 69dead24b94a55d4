//! Shapes the two records logged around an informed call.
//!
//! Building a record never fails. A value that cannot be serialized, or an
//! accessor that panics, is logged as a placeholder object instead.

use serde_json::{json, Map, Value};

use super::accessor::AccessorTable;
use super::arguments::NamedArguments;
use super::config::InstrumentationSpec;
use super::Informee;
use crate::error::ValueError;
use crate::record::LogRecord;

pub const STATUS_STARTING: &str = "starting";
pub const STATUS_DONE: &str = "done";

/// Everything one invocation knows before the original method runs.
pub struct CallContext<'a, T: ?Sized, A: ?Sized> {
    pub target: &'a T,
    pub arguments: &'a A,
    pub spec: &'a InstrumentationSpec,
    pub accessors: &'a AccessorTable<T>,
}

impl<'a, T, A> CallContext<'a, T, A>
where
    T: Informee + ?Sized,
    A: NamedArguments + ?Sized,
{
    /// `method`, `class` and, when values were asked for, `values`.
    fn base_record(&self) -> LogRecord {
        let mut record = LogRecord::new();
        record.insert("method", self.spec.method.as_str());
        record.insert("class", self.target.type_name());

        let names = &self.spec.also_log.values;
        if !names.is_empty() {
            let mut values = Map::new();
            for name in names {
                if let Some(value) = self.resolve(name) {
                    values.insert(name.clone(), value);
                }
            }
            record.insert("values", Value::Object(values));
        }
        record
    }

    // Named arguments win over accessors; names matching neither are skipped.
    fn resolve(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.arguments.named_value(name) {
            return Some(value);
        }
        let read = self.accessors.read(name, self.target)?;
        Some(self.or_placeholder(name, read))
    }

    fn or_placeholder(&self, key: &str, read: Result<Value, ValueError>) -> Value {
        match read {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(method = %self.spec.method, key, error = %err, "value not logged");
                placeholder(&err)
            }
        }
    }
}

/// Stands in for a value that could not be logged.
pub fn placeholder(err: &ValueError) -> Value {
    match err {
        ValueError::Unserializable(err) => json!({ "unserializable": err.to_string() }),
        ValueError::Panicked => json!({ "unavailable": err.to_string() }),
    }
}

pub struct StartingMessage<'c, 'a, T: ?Sized, A: ?Sized> {
    context: &'c CallContext<'a, T, A>,
}

impl<'c, 'a, T, A> StartingMessage<'c, 'a, T, A>
where
    T: Informee + ?Sized,
    A: NamedArguments + ?Sized,
{
    pub fn new(context: &'c CallContext<'a, T, A>) -> Self {
        Self { context }
    }

    pub fn to_record(&self) -> LogRecord {
        let mut record = self.context.base_record();
        record.insert("status", STATUS_STARTING);
        record
    }
}

pub struct DoneMessage<'c, 'a, T: ?Sized, A: ?Sized> {
    context: &'c CallContext<'a, T, A>,
    result: Option<Result<Value, ValueError>>,
}

impl<'c, 'a, T, A> DoneMessage<'c, 'a, T, A>
where
    T: Informee + ?Sized,
    A: NamedArguments + ?Sized,
{
    /// `result` is the captured return value, `None` when it is not captured.
    pub fn new(
        context: &'c CallContext<'a, T, A>,
        result: Option<Result<Value, ValueError>>,
    ) -> Self {
        Self { context, result }
    }

    /// The result goes in last so nothing earlier can shadow it.
    pub fn to_record(self) -> LogRecord {
        let mut record = self.context.base_record();
        record.insert("status", STATUS_DONE);
        if self.context.spec.also_log.result {
            if let Some(read) = self.result {
                record.insert("result", self.context.or_placeholder("result", read));
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::informant::{AlsoLog, Arguments, ResultCapture, SerializeResult};
    use crate::level::Level;
    use serde_json::json;

    struct Service {
        fanciness: u32,
    }

    impl Informee for Service {
        fn type_name(&self) -> &str {
            "FancyService"
        }
    }

    fn accessors() -> AccessorTable<Service> {
        let mut table = AccessorTable::new();
        table.insert("fanciness", |s: &Service| s.fanciness);
        table.insert("fancy", |s: &Service| s.fanciness > 10);
        table.insert("force", |_: &Service| "from accessor");
        table
    }

    #[test]
    fn test_base_record_without_policy() {
        let spec = InstrumentationSpec::new("do_something", Level::Info, AlsoLog::nothing());
        let table = accessors();
        let args = Arguments::new();
        let context = CallContext {
            target: &Service { fanciness: 12 },
            arguments: &args,
            spec: &spec,
            accessors: &table,
        };

        let starting = StartingMessage::new(&context).to_record();
        assert_eq!(
            serde_json::to_value(&starting).unwrap(),
            json!({"method": "do_something", "class": "FancyService", "status": "starting"})
        );

        let done = DoneMessage::new(&context, SerializeResult.capture("so fancy")).to_record();
        assert_eq!(
            serde_json::to_value(&done).unwrap(),
            json!({"method": "do_something", "class": "FancyService", "status": "done"})
        );
    }

    #[test]
    fn test_values_resolution_order_and_key_order() {
        let spec = InstrumentationSpec::new(
            "do_something",
            Level::Info,
            AlsoLog::values(["fancy", "force", "missing", "fanciness"]).with_result(),
        );
        let table = accessors();
        let args = Arguments::new().named("force", true);
        let context = CallContext {
            target: &Service { fanciness: 8 },
            arguments: &args,
            spec: &spec,
            accessors: &table,
        };

        let done = DoneMessage::new(&context, SerializeResult.capture("so fancy")).to_record();
        let keys: Vec<&str> = done.keys().collect();
        assert_eq!(keys, vec!["method", "class", "values", "status", "result"]);
        assert_eq!(
            done.get("values").unwrap(),
            &json!({"fancy": false, "force": true, "fanciness": 8})
        );
        assert!(done.value("missing").is_none());
        assert_eq!(done.get("result").unwrap(), &json!("so fancy"));
    }

    #[test]
    fn test_null_result_still_logged() {
        let spec = InstrumentationSpec::new("m", Level::Debug, AlsoLog::result());
        let table = AccessorTable::<Service>::new();
        let context = CallContext {
            target: &Service { fanciness: 0 },
            arguments: &(),
            spec: &spec,
            accessors: &table,
        };

        let done = DoneMessage::new(&context, SerializeResult.capture(&None::<u32>)).to_record();
        assert_eq!(done.get("result"), Some(&Value::Null));

        let starting = StartingMessage::new(&context).to_record();
        assert!(!starting.contains_key("result"));
    }

    #[test]
    fn test_unserializable_values_become_placeholders() {
        let mut table = AccessorTable::<Service>::new();
        table.insert("grid", |_: &Service| {
            std::collections::HashMap::from([((0u8, 0u8), 1u32)])
        });
        table.insert("exploding", |_: &Service| -> u32 { panic!("accessor blew up") });
        let spec = InstrumentationSpec::new(
            "m",
            Level::Info,
            AlsoLog::values(["grid", "exploding"]).with_result(),
        );
        let context = CallContext {
            target: &Service { fanciness: 0 },
            arguments: &(),
            spec: &spec,
            accessors: &table,
        };

        let grid = std::collections::HashMap::from([((1u8, 2u8), 3u32)]);
        let done = DoneMessage::new(&context, SerializeResult.capture(&grid)).to_record();

        assert!(done.value("grid").unwrap().get("unserializable").is_some());
        assert_eq!(
            done.value("exploding"),
            Some(&json!({"unavailable": "accessor panicked"}))
        );
        assert!(done.get("result").unwrap().get("unserializable").is_some());
    }
}
