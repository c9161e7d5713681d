//! The `HX-Location` directive.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A client-side navigation without a full page reload.
///
/// When only [`path`](HtmxLocation::path) is set the header carries the bare path;
/// otherwise the whole directive is sent as a JSON object with unset fields omitted.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::types::HtmxLocation;
///
/// let location = HtmxLocation::new("/messages");
/// assert!(!location.has_context_data());
///
/// let location = HtmxLocation::new("/messages").target("#main").select("#content");
/// assert!(location.has_context_data());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HtmxLocation {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    values: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
}

impl HtmxLocation {
    /// Create a directive navigating to `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// The source element of the request.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// An event that "triggered" the request.
    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// A callback that will handle the response HTML.
    #[must_use]
    pub fn handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// The target to swap the response into.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// How the response will be swapped in relative to the target.
    ///
    /// Accepts a plain string or an [`HtmxReswap`](crate::types::HtmxReswap).
    #[must_use]
    pub fn swap(mut self, swap: impl fmt::Display) -> Self {
        self.swap = Some(swap.to_string());
        self
    }

    /// Which content from the response is swapped in.
    #[must_use]
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Add a value to submit with the request.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Add a header to submit with the request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The navigation path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Values submitted with the request.
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Headers submitted with the request.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Whether any field besides the path is set.
    #[must_use]
    pub fn has_context_data(&self) -> bool {
        let set = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());

        set(&self.source)
            || set(&self.event)
            || set(&self.handler)
            || set(&self.target)
            || set(&self.swap)
            || set(&self.select)
            || !self.values.is_empty()
            || !self.headers.is_empty()
    }

    /// Copy of this directive with a different path; used when resolving the path at
    /// compile time.
    pub(crate) fn with_path(&self, path: String) -> Self {
        Self {
            path,
            ..self.clone()
        }
    }
}

impl From<&str> for HtmxLocation {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for HtmxLocation {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
