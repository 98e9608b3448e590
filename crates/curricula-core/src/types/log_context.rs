//! Structured context attached to a single log call.

use serde::Serialize;
use serde_json::{Map, Value};

/// Open string-keyed map attached to one log call.
///
/// Built once, then only read: the logger serializes it to compact JSON
/// when the record is emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogContext(Map<String, Value>);

impl LogContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Looks up one key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON encoding, e.g. `{"userId":"user_456"}`.
    pub fn to_compact_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<Map<String, Value>> for LogContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
