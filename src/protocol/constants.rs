//! Wire names of the htmx request and response headers.
//!
//! Header names are lowercase, as required by [`HeaderName::from_static`]; HTTP header
//! names are case-insensitive so `HX-Trigger` and `hx-trigger` are the same header.

/// htmx header names.
pub mod headers {
    use http::HeaderName;

    // ========== Request headers ==========

    /// Always `true` on requests issued by htmx.
    pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
    /// Present when the request comes from an element using `hx-boost`.
    pub const HX_BOOSTED: HeaderName = HeaderName::from_static("hx-boosted");
    /// The current URL of the browser.
    pub const HX_CURRENT_URL: HeaderName = HeaderName::from_static("hx-current-url");
    /// Present when the request is for history restoration after a local cache miss.
    pub const HX_HISTORY_RESTORE_REQUEST: HeaderName =
        HeaderName::from_static("hx-history-restore-request");
    /// The user response to an `hx-prompt`.
    pub const HX_PROMPT: HeaderName = HeaderName::from_static("hx-prompt");
    /// The id of the target element.
    pub const HX_TARGET: HeaderName = HeaderName::from_static("hx-target");
    /// The name of the triggered element.
    pub const HX_TRIGGER_NAME: HeaderName = HeaderName::from_static("hx-trigger-name");

    // ========== Shared ==========

    /// Request: id of the triggered element. Response: events to trigger on receipt.
    pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

    // ========== Response headers ==========

    /// Client-side redirect without a full page reload.
    pub const HX_LOCATION: HeaderName = HeaderName::from_static("hx-location");
    /// Pushes a URL into the history stack.
    pub const HX_PUSH_URL: HeaderName = HeaderName::from_static("hx-push-url");
    /// Client-side redirect with a full page reload.
    pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");
    /// Full refresh of the page when `true`.
    pub const HX_REFRESH: HeaderName = HeaderName::from_static("hx-refresh");
    /// Replaces the current URL in the location bar.
    pub const HX_REPLACE_URL: HeaderName = HeaderName::from_static("hx-replace-url");
    /// Overrides how the response is swapped.
    pub const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");
    /// CSS selector overriding the target of the swap.
    pub const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
    /// CSS selector choosing which part of the response is swapped in.
    pub const HX_RESELECT: HeaderName = HeaderName::from_static("hx-reselect");
    /// Events to trigger after the settle step.
    pub const HX_TRIGGER_AFTER_SETTLE: HeaderName =
        HeaderName::from_static("hx-trigger-after-settle");
    /// Events to trigger after the swap step.
    pub const HX_TRIGGER_AFTER_SWAP: HeaderName = HeaderName::from_static("hx-trigger-after-swap");

    // ========== CORS ==========

    /// Sent by browsers on CORS preflight requests.
    pub const ACCESS_CONTROL_REQUEST_METHOD: HeaderName = http::header::ACCESS_CONTROL_REQUEST_METHOD;
    /// Origin of a cross-site request.
    pub const ORIGIN: HeaderName = http::header::ORIGIN;
}

/// Suffix of the companion header htmx sends when it URI-encoded a request header value.
pub const URI_AUTO_ENCODED_SUFFIX: &str = "-uri-autoencoded";

/// `HX-Push-Url` value that prevents a history update.
pub const FALSE: &str = "false";

/// The only value `HX-Refresh` is ever written with.
pub const TRUE: &str = "true";
