//! Named client-side events carried by the `HX-Trigger*` response headers.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A set of named events, each with an optional detail payload.
///
/// Event names are unique keys: inserting a name twice keeps the last detail.
/// A detail of [`Value::Null`] means "no detail". Names are kept sorted so that the
/// serialized header value depends only on the contents, not on insertion order.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::types::Triggers;
/// use serde_json::{json, Value};
///
/// let mut triggers = Triggers::new();
/// triggers.insert("itemSaved", Value::Null);
/// triggers.insert("itemSaved", json!({"id": 7}));
/// assert_eq!(triggers.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Triggers {
    events: BTreeMap<String, Value>,
}

impl Triggers {
    /// Create an empty event set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an event.
    pub fn insert(&mut self, name: impl Into<String>, detail: Value) {
        self.events.insert(name.into(), detail);
    }

    /// Union with `other`; on a name collision `other`'s detail wins.
    pub fn extend(&mut self, other: Triggers) {
        self.events.extend(other.events);
    }

    /// Detail of the named event, if the event is present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.events.get(name)
    }

    /// Whether the named event is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True when no event carries a detail payload.
    #[must_use]
    pub fn all_without_detail(&self) -> bool {
        self.events.values().all(Value::is_null)
    }

    /// Event names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// `(name, detail)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.events.iter().map(|(k, v)| (k.as_str(), v))
    }
}
