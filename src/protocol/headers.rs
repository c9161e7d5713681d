//! Shared header parsing and formatting for the htmx protocol.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | HX-Trigger* | Bare name, comma-joined names, or JSON object | `saved`, `a,b`, `{"a":null,"b":{"x":1}}` |
//! | HX-Location | Bare path or JSON object | `/inbox`, `{"path":"/inbox","target":"#main"}` |
//! | HX-Reswap delays | Integer milliseconds with `ms` suffix | `300ms` |
//!
//! # Examples
//!
//! ```
//! use htmx_axum_http::protocol::{format_trigger_header, format_duration, parse_duration};
//! use htmx_axum_http::types::Triggers;
//! use serde_json::Value;
//! use std::time::Duration;
//!
//! let mut triggers = Triggers::new();
//! triggers.insert("saved", Value::Null);
//! assert_eq!(format_trigger_header(&triggers).unwrap().as_deref(), Some("saved"));
//!
//! assert_eq!(format_duration(Duration::from_millis(300)), "300ms");
//! assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
//! ```

use crate::error::{HtmxError, Result};
use crate::types::{HtmxLocation, Triggers};
use http::{HeaderName, HeaderValue};
use std::time::Duration;

/// Format a trigger set for `HX-Trigger`, `HX-Trigger-After-Settle` or `HX-Trigger-After-Swap`.
///
/// Returns `None` when the set is empty: no header must be written.
/// When no event carries a detail the value is the comma-joined event names (a single
/// event is therefore its bare name). Otherwise the value is a JSON object mapping every
/// name to its detail, `null` for events without one.
///
/// # Errors
///
/// Returns [`HtmxError::Serialization`] if a detail cannot be encoded.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::protocol::format_trigger_header;
/// use htmx_axum_http::types::Triggers;
/// use serde_json::{json, Value};
///
/// let mut triggers = Triggers::new();
/// triggers.insert("a", Value::Null);
/// triggers.insert("b", Value::Null);
/// assert_eq!(format_trigger_header(&triggers).unwrap().as_deref(), Some("a,b"));
///
/// triggers.insert("b", json!({"x": 1}));
/// assert_eq!(
///     format_trigger_header(&triggers).unwrap().as_deref(),
///     Some(r#"{"a":null,"b":{"x":1}}"#)
/// );
/// ```
pub fn format_trigger_header(triggers: &Triggers) -> Result<Option<String>> {
    if triggers.is_empty() {
        return Ok(None);
    }

    if triggers.all_without_detail() {
        return Ok(Some(triggers.names().collect::<Vec<_>>().join(",")));
    }

    Ok(Some(serde_json::to_string(triggers)?))
}

/// Format an `HX-Location` value.
///
/// A directive with no context data is sent as its bare path, anything else as JSON.
///
/// # Errors
///
/// Returns [`HtmxError::Serialization`] if a value cannot be encoded.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::protocol::format_location_header;
/// use htmx_axum_http::types::HtmxLocation;
///
/// let bare = HtmxLocation::new("/path");
/// assert_eq!(format_location_header(&bare).unwrap(), "/path");
///
/// let full = HtmxLocation::new("/path").target("#main");
/// assert_eq!(format_location_header(&full).unwrap(), r##"{"path":"/path","target":"#main"}"##);
/// ```
pub fn format_location_header(location: &HtmxLocation) -> Result<String> {
    if location.has_context_data() {
        Ok(serde_json::to_string(location)?)
    } else {
        Ok(location.path().to_string())
    }
}

/// Format a delay as integer milliseconds, e.g. `300ms`.
#[inline]
pub fn format_duration(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

/// Parse an htmx time interval.
///
/// # Supported Formats
///
/// | Format | Example | Result |
/// |--------|---------|--------|
/// | Milliseconds | `"500ms"` | 500 ms |
/// | Seconds | `"2s"` | 2000 ms |
/// | Minutes | `"1m"` | 60000 ms |
/// | Plain number | `"250"` | 250 ms |
///
/// # Errors
///
/// Returns [`HtmxError::HeaderParse`] if the number cannot be parsed.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    let invalid = || HtmxError::HeaderParse(format!("Invalid time interval: {}", value));

    // "ms" must be checked before "s" and "m"
    if let Some(ms) = trimmed.strip_suffix("ms") {
        return ms.parse().map(Duration::from_millis).map_err(|_| invalid());
    }

    if let Some(s) = trimmed.strip_suffix('s') {
        return s.parse().map(Duration::from_secs).map_err(|_| invalid());
    }

    if let Some(m) = trimmed.strip_suffix('m') {
        let minutes: u64 = m.parse().map_err(|_| invalid())?;
        return minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(invalid);
    }

    trimmed.parse().map(Duration::from_millis).map_err(|_| invalid())
}

/// Decode a header value htmx sent URI-encoded (`encodeURIComponent`).
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::protocol::decode_uri_component;
///
/// assert_eq!(decode_uri_component("caf%C3%A9"), "café");
/// assert_eq!(decode_uri_component("plain"), "plain");
/// ```
pub fn decode_uri_component(value: &str) -> String {
    // encodeURIComponent escapes '&' and '=', so the whole value is a single key
    url::form_urlencoded::parse(value.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

/// Convert a formatted value into a [`HeaderValue`].
///
/// # Errors
///
/// Returns [`HtmxError::InvalidHeaderValue`] if the value contains bytes that are not
/// allowed in an HTTP header.
pub fn to_header_value(name: &HeaderName, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| HtmxError::InvalidHeaderValue {
        header: name.as_str().to_string(),
        value: value.to_string(),
    })
}
