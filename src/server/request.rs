//! htmx request context extracted from incoming request headers.
//!
//! # Headers
//!
//! | Header | Field |
//! |--------|-------|
//! | `HX-Request` | [`HtmxRequest::is_htmx_request`] |
//! | `HX-Boosted` | [`HtmxRequest::boosted`] |
//! | `HX-Current-URL` | [`HtmxRequest::current_url`] |
//! | `HX-History-Restore-Request` | [`HtmxRequest::history_restore_request`] |
//! | `HX-Prompt` | [`HtmxRequest::prompt_response`] |
//! | `HX-Target` | [`HtmxRequest::target`] |
//! | `HX-Trigger-Name` | [`HtmxRequest::trigger_name`] |
//! | `HX-Trigger` | [`HtmxRequest::trigger_id`] |
//!
//! Flags are presence flags: the header value is ignored. String values sent with a
//! `<Header>-URI-AutoEncoded: true` companion are URI-decoded.

use crate::protocol::{self, constants, constants::headers};
use axum::{extract::FromRequestParts, http::request::Parts};
use http::{HeaderMap, HeaderName};
use std::convert::Infallible;
use std::sync::Arc;

/// Immutable htmx view of an incoming request.
///
/// When `HX-Request` is absent every other field is absent as well: the value is
/// [`HtmxRequest::empty`], whatever other `HX-*` headers were sent.
///
/// # Examples
///
/// ```ignore
/// use htmx_axum_http::HtmxRequest;
///
/// async fn handler(htmx: HtmxRequest) -> String {
///     match htmx.target.as_deref() {
///         Some(target) => format!("swapping into #{}", target),
///         None => "full page".to_string(),
///     }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmxRequest {
    /// `HX-Request` was present
    pub is_htmx_request: bool,

    /// `HX-Boosted` was present
    pub boosted: bool,

    /// Browser URL at the time of the request
    pub current_url: Option<String>,

    /// The request restores history after a local cache miss
    pub history_restore_request: bool,

    /// User response to `hx-prompt`
    pub prompt_response: Option<String>,

    /// Id of the target element
    pub target: Option<String>,

    /// Name of the triggered element
    pub trigger_name: Option<String>,

    /// Id of the triggered element
    pub trigger_id: Option<String>,
}

impl HtmxRequest {
    /// The context of a request that was not issued by htmx.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the htmx request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if !headers.contains_key(headers::HX_REQUEST) {
            return Self::empty();
        }

        HtmxRequest {
            is_htmx_request: true,
            boosted: headers.contains_key(headers::HX_BOOSTED),
            current_url: header_string(headers, &headers::HX_CURRENT_URL),
            history_restore_request: headers.contains_key(headers::HX_HISTORY_RESTORE_REQUEST),
            prompt_response: header_string(headers, &headers::HX_PROMPT),
            target: header_string(headers, &headers::HX_TARGET),
            trigger_name: header_string(headers, &headers::HX_TRIGGER_NAME),
            trigger_id: header_string(headers, &headers::HX_TRIGGER),
        }
    }
}

/// Read a header as a string, URI-decoding it when htmx flagged it as encoded.
pub(crate) fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?;

    let encoded_flag = format!("{}{}", name.as_str(), constants::URI_AUTO_ENCODED_SUFFIX);
    let encoded = headers
        .get(encoded_flag.as_str())
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case(constants::TRUE));

    if encoded {
        Some(protocol::decode_uri_component(value))
    } else {
        Some(value.to_string())
    }
}

impl<S> FromRequestParts<S> for HtmxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Reuse the context parsed by HtmxLayer when present
        if let Some(request) = parts.extensions.get::<Arc<HtmxRequest>>() {
            return Ok(request.as_ref().clone());
        }
        Ok(HtmxRequest::from_headers(&parts.headers))
    }
}
