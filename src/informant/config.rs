use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Extra context attached to the records of an informed method.
///
/// The default logs nothing extra.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlsoLog {
    /// Attach the method's return value to the done record.
    pub result: bool,
    /// Named arguments or registered accessors to log under `values`.
    pub values: Vec<String>,
}

impl AlsoLog {
    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn result() -> Self {
        Self {
            result: true,
            values: Vec::new(),
        }
    }

    pub fn values<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            result: false,
            values: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_result(mut self) -> Self {
        self.result = true;
        self
    }
}

/// How one method is informed upon. Fixed once declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentationSpec {
    pub method: String,
    pub level: Level,
    #[serde(default)]
    pub also_log: AlsoLog,
}

impl InstrumentationSpec {
    pub fn new(method: impl Into<String>, level: Level, also_log: AlsoLog) -> Self {
        Self {
            method: method.into(),
            level,
            also_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_json_with_full_policy() {
        let json = r#"{
            "method": "do_something",
            "level": "info",
            "also_log": {"result": true, "values": ["fancy", "force"]}
        }"#;
        let spec: InstrumentationSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.method, "do_something");
        assert_eq!(spec.level, Level::Info);
        assert!(spec.also_log.result);
        assert_eq!(spec.also_log.values, vec!["fancy", "force"]);
    }

    #[test]
    fn test_missing_policy_logs_nothing_extra() {
        let spec: InstrumentationSpec =
            serde_json::from_str(r#"{"method":"do_it_plain","level":"debug"}"#).unwrap();
        assert_eq!(spec.also_log, AlsoLog::nothing());

        let partial: AlsoLog = serde_json::from_str(r#"{"values":["force"]}"#).unwrap();
        assert!(!partial.result);
        assert_eq!(partial.values, vec!["force"]);
    }

    #[test]
    fn test_unsupported_level_is_rejected() {
        let json = r#"{"method":"m","level":"loud"}"#;
        let parsed = serde_json::from_str::<InstrumentationSpec>(json);
        assert!(parsed.is_err());
    }
}
