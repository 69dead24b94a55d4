use serde_json::{Map, Value};

/// Answers "what was passed for the named argument `name`?" for a call.
///
/// Only named arguments take part in `also_log` value resolution; positional
/// arguments are forwarded but never logged.
pub trait NamedArguments {
    fn named_value(&self, name: &str) -> Option<Value>;
}

/// Arguments of one call: positional values in order, then named values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    named: Map<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    pub fn str_at(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_str)
    }

    pub fn named_str(&self, name: &str) -> Option<&str> {
        self.get_named(name).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl NamedArguments for Arguments {
    fn named_value(&self, name: &str) -> Option<Value> {
        self.named.get(name).cloned()
    }
}

impl NamedArguments for Map<String, Value> {
    fn named_value(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl NamedArguments for () {
    fn named_value(&self, _name: &str) -> Option<Value> {
        None
    }
}
