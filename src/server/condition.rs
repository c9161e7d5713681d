//! htmx request conditions attached to routes.
//!
//! An [`HtmxCondition`] is declared once per route at registration time and evaluated
//! against every incoming request. It is a plain value: evaluation is a pure function of
//! the request method and headers.
//!
//! # Matching
//!
//! - A condition that declares nothing matches every request.
//! - Any declared condition requires `HX-Request` to be present (its value is ignored).
//! - Declared trigger-id, trigger-name, target and value conditions must equal the
//!   corresponding header exactly. A declared value matches either `HX-Trigger` or
//!   `HX-Trigger-Name`.
//! - CORS preflight requests always match, so a condition never blocks a preflight.
//!
//! # Ranking
//!
//! [`HtmxCondition`] is totally ordered; a smaller condition is a better match. Fields are
//! compared in the order value, trigger-id, trigger-name, target, boosted, `HX-Request`.
//! For each field a declared value sorts before an undeclared one and two declared values
//! compare lexicographically. A CORS preflight ranks every condition as the empty one, so
//! [`best_match`] picks the first candidate.

use crate::protocol::constants::headers;
use crate::server::request::header_string;
use http::{HeaderMap, Method};
use std::cmp::Ordering;

/// htmx preconditions of a route.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::HtmxCondition;
/// use http::{HeaderMap, HeaderValue, Method};
///
/// let condition = HtmxCondition::htmx().target("bar");
///
/// let mut headers = HeaderMap::new();
/// headers.insert("hx-request", HeaderValue::from_static("true"));
/// headers.insert("hx-target", HeaderValue::from_static("bar"));
/// assert!(condition.matches(&Method::GET, &headers));
///
/// headers.insert("hx-target", HeaderValue::from_static("foo"));
/// assert!(!condition.matches(&Method::GET, &headers));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HtmxCondition {
    request: bool,
    boosted: bool,
    value: Option<String>,
    trigger_id: Option<String>,
    trigger_name: Option<String>,
    target: Option<String>,
}

impl HtmxCondition {
    /// A condition that declares nothing and matches every request.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Require `HX-Request`.
    #[must_use]
    pub fn htmx() -> Self {
        Self {
            request: true,
            ..Self::default()
        }
    }

    /// Require `HX-Trigger` or `HX-Trigger-Name` to equal `value`.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.request = true;
        self.value = Some(value.into());
        self
    }

    /// Require `HX-Trigger` (the id of the triggered element) to equal `id`.
    #[must_use]
    pub fn trigger_id(mut self, id: impl Into<String>) -> Self {
        self.request = true;
        self.trigger_id = Some(id.into());
        self
    }

    /// Require `HX-Trigger-Name` to equal `name`.
    #[must_use]
    pub fn trigger_name(mut self, name: impl Into<String>) -> Self {
        self.request = true;
        self.trigger_name = Some(name.into());
        self
    }

    /// Require `HX-Target` to equal `target`.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.request = true;
        self.target = Some(target.into());
        self
    }

    /// Require `HX-Boosted`.
    #[must_use]
    pub fn boosted(mut self) -> Self {
        self.request = true;
        self.boosted = true;
        self
    }

    /// Whether the condition declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.request
    }

    /// Evaluate the condition against a request.
    #[must_use]
    pub fn matches(&self, method: &Method, headers: &HeaderMap) -> bool {
        if self.is_empty() {
            return true;
        }

        if is_preflight(method, headers) {
            tracing::trace!(condition = ?self, "preflight request bypasses htmx condition");
            return true;
        }

        let matched = self.matches_headers(headers);
        tracing::trace!(condition = ?self, matched, "evaluated htmx condition");
        matched
    }

    fn matches_headers(&self, headers: &HeaderMap) -> bool {
        if !headers.contains_key(headers::HX_REQUEST) {
            return false;
        }
        if self.boosted && !headers.contains_key(headers::HX_BOOSTED) {
            return false;
        }

        let trigger_id = header_string(headers, &headers::HX_TRIGGER);
        let trigger_name = header_string(headers, &headers::HX_TRIGGER_NAME);
        let target = header_string(headers, &headers::HX_TARGET);

        let equals = |declared: &Option<String>, actual: &Option<String>| match declared {
            Some(declared) => actual.as_deref() == Some(declared.as_str()),
            None => true,
        };

        let value_matches = match &self.value {
            Some(value) => {
                trigger_id.as_deref() == Some(value.as_str())
                    || trigger_name.as_deref() == Some(value.as_str())
            }
            None => true,
        };

        value_matches
            && equals(&self.trigger_id, &trigger_id)
            && equals(&self.trigger_name, &trigger_name)
            && equals(&self.target, &target)
    }
}

/// Declared before undeclared; declared values lexicographically.
fn compare_declared(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Ord for HtmxCondition {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_declared(&self.value, &other.value)
            .then_with(|| compare_declared(&self.trigger_id, &other.trigger_id))
            .then_with(|| compare_declared(&self.trigger_name, &other.trigger_name))
            .then_with(|| compare_declared(&self.target, &other.target))
            // true sorts first
            .then_with(|| other.boosted.cmp(&self.boosted))
            .then_with(|| other.request.cmp(&self.request))
    }
}

impl PartialOrd for HtmxCondition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether the request is a CORS preflight.
#[must_use]
pub fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(headers::ORIGIN)
        && headers.contains_key(headers::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Index of the best matching condition, or `None` when nothing matches.
///
/// Among equal conditions the first one wins. A CORS preflight ranks every condition as
/// the empty one, so the first candidate is chosen.
pub fn best_match<'a, I>(conditions: I, method: &Method, headers: &HeaderMap) -> Option<usize>
where
    I: IntoIterator<Item = &'a HtmxCondition>,
{
    let preflight = is_preflight(method, headers);

    conditions
        .into_iter()
        .enumerate()
        .filter(|(_, condition)| condition.matches(method, headers))
        .min_by(|(_, a), (_, b)| {
            if preflight {
                Ordering::Equal
            } else {
                a.cmp(b)
            }
        })
        .map(|(index, _)| index)
}
