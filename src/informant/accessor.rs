use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ValueError;

type AccessorFn<T> = Box<dyn Fn(&T) -> Result<Value, serde_json::Error> + Send + Sync>;

/// Zero-argument accessors on `T`, by name, that `also_log.values` can read.
///
/// Private helpers are fine: the closure is written where the type is
/// visible, so it can call whatever the declaring module can.
pub struct AccessorTable<T: ?Sized> {
    accessors: HashMap<String, AccessorFn<T>>,
}

impl<T: ?Sized> AccessorTable<T> {
    pub fn new() -> Self {
        Self {
            accessors: HashMap::new(),
        }
    }

    /// Registers `accessor` under `name`, replacing any earlier one.
    pub fn insert<V, F>(&mut self, name: impl Into<String>, accessor: F)
    where
        T: 'static,
        V: Serialize,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.accessors.insert(
            name.into(),
            Box::new(move |target: &T| serde_json::to_value(accessor(target))),
        );
    }

    /// Invokes the accessor called `name`, if there is one.
    ///
    /// A panicking accessor is reported as `ValueError::Panicked`; it does not
    /// unwind into the informed call.
    pub fn read(&self, name: &str, target: &T) -> Option<Result<Value, ValueError>> {
        let accessor = self.accessors.get(name)?;
        let read = panic::catch_unwind(AssertUnwindSafe(|| accessor(target)));
        Some(match read {
            Ok(value) => value.map_err(ValueError::from),
            Err(_) => Err(ValueError::Panicked),
        })
    }
}

impl<T: ?Sized> Default for AccessorTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for AccessorTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.accessors.keys().collect();
        names.sort();
        f.debug_struct("AccessorTable").field("names", &names).finish()
    }
}
