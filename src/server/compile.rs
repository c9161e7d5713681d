//! Compiling an [`HtmxResponse`] into response headers and a fragment list.
//!
//! # Header order
//!
//! 1. `HX-Trigger`, `HX-Trigger-After-Settle`, `HX-Trigger-After-Swap` (only non-empty sets)
//! 2. `HX-Location`
//! 3. `HX-Replace-Url` or `HX-Push-Url`
//! 4. `HX-Redirect`, `HX-Refresh`, `HX-Retarget`, `HX-Reselect`, `HX-Reswap`
//!
//! Absolute URLs in `HX-Push-Url`, `HX-Replace-Url` and the `HX-Location` path are
//! prefixed with the context path when the compiler is context-relative. A URL that
//! already starts with the context path is left alone, so compiling twice never
//! double-prefixes.
//!
//! # Usage
//!
//! ```ignore
//! use htmx_axum_http::{HtmxResponse, InlineRenderer, ResponseCompiler};
//!
//! async fn handler(compiler: ResponseCompiler) -> htmx_axum_http::Result<Response> {
//!     let response = HtmxResponse::builder()
//!         .inline_fragment("row", "<tr>...</tr>")
//!         .trigger("rowAdded")
//!         .build()?;
//!     compiler.compile(&response)?.render(&InlineRenderer)
//! }
//! ```

use super::config::{normalize_context_path, ServerConfig};
use super::response::{HistoryUrl, HtmxResponse};
use crate::error::{HtmxError, Result};
use crate::protocol::{self, constants, constants::headers};
use crate::types::{Fragment, Triggers};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{Html, IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use http::{HeaderName, HeaderValue};
use std::convert::Infallible;
use std::sync::Arc;

/// Request-scoped compiler turning an [`HtmxResponse`] into headers.
///
/// Obtained as an axum extractor (using the [`ServerConfig`] installed by
/// [`HtmxLayer`](super::HtmxLayer), or defaults) or built directly with
/// [`ResponseCompiler::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCompiler {
    context_path: String,
    context_relative: bool,
    current_url: String,
    enable_logging: bool,
}

impl ResponseCompiler {
    /// Create a compiler for a request whose path and query is `current_url`.
    #[must_use]
    pub fn new(config: &ServerConfig, current_url: impl Into<String>) -> Self {
        Self {
            context_path: config.normalized_context_path(),
            context_relative: config.context_relative,
            current_url: current_url.into(),
            enable_logging: config.enable_logging,
        }
    }

    /// Override the context path.
    #[must_use]
    pub fn with_context_path(mut self, context_path: &str) -> Self {
        self.context_path = normalize_context_path(context_path);
        self
    }

    /// Path and query substituted for the current-URL directives.
    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Apply the context path to `url`.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> String {
        let prefix = self.context_relative
            && !self.context_path.is_empty()
            && url.starts_with('/')
            && !url.starts_with("//")
            && !starts_with_context_path(url, &self.context_path);

        if prefix {
            format!("{}{}", self.context_path, url)
        } else {
            url.to_string()
        }
    }

    fn resolve_history_url(&self, url: &HistoryUrl) -> String {
        match url {
            HistoryUrl::Url(url) => self.resolve_url(url),
            HistoryUrl::Current => self.resolve_url(&self.current_url),
            HistoryUrl::Prevent => constants::FALSE.to_string(),
        }
    }

    /// Produce the ordered headers and fragments for `response`.
    ///
    /// # Errors
    ///
    /// Returns [`HtmxError::Serialization`] if a trigger detail or location cannot be
    /// encoded, or [`HtmxError::InvalidHeaderValue`] if a value is not a legal header value.
    pub fn compile(&self, response: &HtmxResponse) -> Result<CompiledResponse> {
        let mut compiled = CompiledResponse {
            headers: Vec::new(),
            fragments: response.fragments().to_vec(),
        };

        compiled.push_triggers(headers::HX_TRIGGER, response.triggers())?;
        compiled.push_triggers(
            headers::HX_TRIGGER_AFTER_SETTLE,
            response.triggers_after_settle(),
        )?;
        compiled.push_triggers(headers::HX_TRIGGER_AFTER_SWAP, response.triggers_after_swap())?;

        if let Some(location) = response.location() {
            let path = if response.location_uses_current_url() {
                self.resolve_url(&self.current_url)
            } else {
                self.resolve_url(location.path())
            };
            let value = protocol::format_location_header(&location.with_path(path))?;
            compiled.push(headers::HX_LOCATION, &value)?;
        }

        if let Some(url) = response.replace_url() {
            compiled.push(headers::HX_REPLACE_URL, &self.resolve_history_url(url))?;
        } else if let Some(url) = response.push_url() {
            compiled.push(headers::HX_PUSH_URL, &self.resolve_history_url(url))?;
        }

        if let Some(redirect) = response.redirect() {
            compiled.push(headers::HX_REDIRECT, redirect)?;
        }
        if response.is_refresh() {
            compiled.push(headers::HX_REFRESH, constants::TRUE)?;
        }
        if let Some(retarget) = response.retarget() {
            compiled.push(headers::HX_RETARGET, retarget)?;
        }
        if let Some(reselect) = response.reselect() {
            compiled.push(headers::HX_RESELECT, reselect)?;
        }
        if let Some(reswap) = response.reswap() {
            compiled.push(headers::HX_RESWAP, &reswap.to_string())?;
        }

        if self.enable_logging {
            tracing::debug!(
                url = %self.current_url,
                headers = compiled.headers.len(),
                fragments = compiled.fragments.len(),
                "compiled htmx response"
            );
        }

        Ok(compiled)
    }
}

fn starts_with_context_path(url: &str, context_path: &str) -> bool {
    match url.strip_prefix(context_path) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

impl<S> FromRequestParts<S> for ResponseCompiler
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let current_url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let compiler = match parts.extensions.get::<Arc<ServerConfig>>() {
            Some(config) => ResponseCompiler::new(config, current_url),
            None => ResponseCompiler::new(&ServerConfig::default(), current_url),
        };
        Ok(compiler)
    }
}

/// Turns a [`Fragment`] into HTML.
///
/// Implemented for closures `Fn(&Fragment) -> Result<String>`, so any template engine
/// can be plugged in.
pub trait FragmentRenderer {
    /// Render one fragment.
    fn render(&self, fragment: &Fragment) -> Result<String>;
}

impl<F> FragmentRenderer for F
where
    F: Fn(&Fragment) -> Result<String>,
{
    fn render(&self, fragment: &Fragment) -> Result<String> {
        self(fragment)
    }
}

/// Renders fragments from their inline content.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineRenderer;

impl FragmentRenderer for InlineRenderer {
    fn render(&self, fragment: &Fragment) -> Result<String> {
        fragment.content().map(str::to_string).ok_or_else(|| {
            HtmxError::Render(format!("fragment {} has no inline content", fragment.view()))
        })
    }
}

/// Headers and fragments ready to be written.
///
/// As [`IntoResponseParts`] it contributes only the headers, so it can be combined with
/// any body: `(compiled, Html(body))`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledResponse {
    headers: Vec<(HeaderName, HeaderValue)>,
    fragments: Vec<Fragment>,
}

impl CompiledResponse {
    fn push(&mut self, name: HeaderName, value: &str) -> Result<()> {
        let value = protocol::to_header_value(&name, value)?;
        self.headers.push((name, value));
        Ok(())
    }

    fn push_triggers(&mut self, name: HeaderName, triggers: &Triggers) -> Result<()> {
        match protocol::format_trigger_header(triggers)? {
            Some(value) => self.push(name, &value),
            None => Ok(()),
        }
    }

    /// Headers in emission order.
    #[must_use]
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Value of the named header, if it was emitted.
    #[must_use]
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.to_str().ok())
    }

    /// Fragments in render order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Render every fragment in order and concatenate the output.
    ///
    /// # Errors
    ///
    /// Returns the first renderer error.
    pub fn render_body(&self, renderer: &impl FragmentRenderer) -> Result<String> {
        let mut body = String::new();
        for fragment in &self.fragments {
            body.push_str(&renderer.render(fragment)?);
        }
        Ok(body)
    }

    /// Build an HTML response carrying the headers and the rendered fragments.
    ///
    /// # Errors
    ///
    /// Returns the first renderer error.
    pub fn render(self, renderer: &impl FragmentRenderer) -> Result<Response> {
        let body = self.render_body(renderer)?;
        Ok((self, Html(body)).into_response())
    }
}

impl IntoResponseParts for CompiledResponse {
    type Error = Infallible;

    fn into_response_parts(
        self,
        mut res: ResponseParts,
    ) -> std::result::Result<ResponseParts, Self::Error> {
        for (name, value) in self.headers {
            res.headers_mut().insert(name, value);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HtmxLocation, HtmxReswap};
    use serde_json::json;
    use std::time::Duration;

    fn compiler(context_path: &str) -> ResponseCompiler {
        let config = ServerConfig {
            context_path: context_path.to_string(),
            ..Default::default()
        };
        ResponseCompiler::new(&config, "/items?page=2")
    }

    fn names(compiled: &CompiledResponse) -> Vec<&str> {
        compiled.headers().iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn test_empty_response_has_no_headers() {
        let response = HtmxResponse::builder().build().unwrap();
        let compiled = compiler("").compile(&response).unwrap();
        assert!(compiled.headers().is_empty());
        assert!(compiled.fragments().is_empty());
    }

    #[test]
    fn test_header_order() {
        let response = HtmxResponse::builder()
            .reswap(HtmxReswap::outer_html())
            .reselect("#r")
            .retarget("#t")
            .refresh()
            .redirect("/r")
            .push_url("/p")
            .location("/l")
            .trigger_after_swap("c")
            .trigger_after_settle("b")
            .trigger("a")
            .build()
            .unwrap();

        let compiled = compiler("").compile(&response).unwrap();
        assert_eq!(
            names(&compiled),
            vec![
                "hx-trigger",
                "hx-trigger-after-settle",
                "hx-trigger-after-swap",
                "hx-location",
                "hx-push-url",
                "hx-redirect",
                "hx-refresh",
                "hx-retarget",
                "hx-reselect",
                "hx-reswap",
            ]
        );
        assert_eq!(compiled.header(&headers::HX_REFRESH), Some("true"));
    }

    #[test]
    fn test_trigger_values() {
        let response = HtmxResponse::builder()
            .trigger("a")
            .trigger_after_settle("a")
            .trigger_after_settle("b")
            .trigger_after_swap("a")
            .trigger_after_swap_with_detail("b", json!({"x": 1}))
            .build()
            .unwrap();

        let compiled = compiler("").compile(&response).unwrap();
        assert_eq!(compiled.header(&headers::HX_TRIGGER), Some("a"));
        assert_eq!(compiled.header(&headers::HX_TRIGGER_AFTER_SETTLE), Some("a,b"));
        assert_eq!(
            compiled.header(&headers::HX_TRIGGER_AFTER_SWAP),
            Some(r#"{"a":null,"b":{"x":1}}"#)
        );
    }

    #[test]
    fn test_context_path_prefix() {
        let response = HtmxResponse::builder().push_url("/path").build().unwrap();
        let compiled = compiler("/ctx").compile(&response).unwrap();
        assert_eq!(compiled.header(&headers::HX_PUSH_URL), Some("/ctx/path"));
    }

    #[test]
    fn test_context_path_not_doubled() {
        let response = HtmxResponse::builder().push_url("/ctx/path").build().unwrap();
        let compiled = compiler("/ctx").compile(&response).unwrap();
        assert_eq!(compiled.header(&headers::HX_PUSH_URL), Some("/ctx/path"));

        let compiler = compiler("").with_context_path("//ctx/");
        assert_eq!(compiler.resolve_url("/ctx"), "/ctx");
        assert_eq!(compiler.resolve_url("/ctxother"), "/ctx/ctxother");
        assert_eq!(compiler.resolve_url(&compiler.resolve_url("/a")), "/ctx/a");
    }

    #[test]
    fn test_relative_and_absolute_urls_untouched() {
        let compiler = compiler("/ctx");
        assert_eq!(compiler.resolve_url("relative"), "relative");
        assert_eq!(compiler.resolve_url("https://example.com/"), "https://example.com/");
        assert_eq!(compiler.resolve_url("//cdn.example.com/x"), "//cdn.example.com/x");
    }

    #[test]
    fn test_context_relative_disabled() {
        let config = ServerConfig {
            context_path: "/ctx".to_string(),
            context_relative: false,
            enable_logging: true,
        };
        let compiler = ResponseCompiler::new(&config, "/");
        assert_eq!(compiler.resolve_url("/path"), "/path");
    }

    #[test]
    fn test_current_url() {
        let push = HtmxResponse::builder().push_current_url().build().unwrap();
        let compiled = compiler("/ctx").compile(&push).unwrap();
        assert_eq!(compiled.header(&headers::HX_PUSH_URL), Some("/ctx/items?page=2"));

        let replace = HtmxResponse::builder()
            .replace_current_url()
            .build()
            .unwrap();
        let compiled = compiler("").compile(&replace).unwrap();
        assert_eq!(compiled.header(&headers::HX_REPLACE_URL), Some("/items?page=2"));
        assert_eq!(compiled.header(&headers::HX_PUSH_URL), None);
    }

    #[test]
    fn test_prevent_history_update() {
        let response = HtmxResponse::builder()
            .prevent_history_update()
            .build()
            .unwrap();
        let compiled = compiler("/ctx").compile(&response).unwrap();
        assert_eq!(compiled.header(&headers::HX_PUSH_URL), Some("false"));
    }

    #[test]
    fn test_location_bare_and_json() {
        let bare = HtmxResponse::builder().location("/path").build().unwrap();
        let compiled = compiler("").compile(&bare).unwrap();
        assert_eq!(compiled.header(&headers::HX_LOCATION), Some("/path"));

        let full = HtmxResponse::builder()
            .location(HtmxLocation::new("/path").target("#main").value("q", "x"))
            .build()
            .unwrap();
        let compiled = compiler("/ctx").compile(&full).unwrap();
        assert_eq!(
            compiled.header(&headers::HX_LOCATION),
            Some(r##"{"path":"/ctx/path","target":"#main","values":{"q":"x"}}"##)
        );
    }

    #[test]
    fn test_location_current_url() {
        let response = HtmxResponse::builder()
            .location_current_url(HtmxLocation::default().select("#list"))
            .build()
            .unwrap();
        let compiled = compiler("").compile(&response).unwrap();
        assert_eq!(
            compiled.header(&headers::HX_LOCATION),
            Some(r##"{"path":"/items?page=2","select":"#list"}"##)
        );
    }

    #[test]
    fn test_reswap_header() {
        let response = HtmxResponse::builder()
            .reswap(HtmxReswap::inner_html().swap(Duration::from_millis(300)))
            .build()
            .unwrap();
        let compiled = compiler("").compile(&response).unwrap();
        assert_eq!(compiled.header(&headers::HX_RESWAP), Some("innerHTML swap:300ms"));
    }

    #[test]
    fn test_invalid_header_value() {
        let response = HtmxResponse::builder().retarget("#a\r\n").build().unwrap();
        let err = compiler("").compile(&response).unwrap_err();
        assert!(matches!(err, HtmxError::InvalidHeaderValue { .. }));
    }

    #[test]
    fn test_render_in_order() {
        let response = HtmxResponse::builder()
            .inline_fragment("b", "<b>")
            .inline_fragment("a", "<a>")
            .build()
            .unwrap();
        let compiled = compiler("").compile(&response).unwrap();
        assert_eq!(compiled.render_body(&InlineRenderer).unwrap(), "<b><a>");

        let upper = |f: &Fragment| -> Result<String> { Ok(f.view().to_uppercase()) };
        assert_eq!(compiled.render_body(&upper).unwrap(), "BA");
    }

    #[test]
    fn test_inline_renderer_requires_content() {
        let response = HtmxResponse::builder().fragment("view").build().unwrap();
        let compiled = compiler("").compile(&response).unwrap();
        assert!(matches!(
            compiled.render(&InlineRenderer),
            Err(HtmxError::Render(_))
        ));
    }
}
