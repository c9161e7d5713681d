//! Building htmx responses.
//!
//! A handler fills an [`HtmxResponseBuilder`] and freezes it with
//! [`build`](HtmxResponseBuilder::build). The resulting [`HtmxResponse`] has no mutators:
//! it is handed to a [`ResponseCompiler`](super::ResponseCompiler) which produces the
//! final headers and fragment list.
//!
//! # Contract violations
//!
//! Blank event names, selectors, URLs and view ids are programming errors. The builder
//! records the first one and [`build`](HtmxResponseBuilder::build) returns it as
//! [`HtmxError::InvalidArgument`]; later calls are still accepted so that chaining stays
//! uninterrupted. A detail payload that cannot be turned into JSON is reported the same
//! way as [`HtmxError::Serialization`].

use crate::error::{HtmxError, Result};
use crate::protocol::constants;
use crate::types::{Fragment, HtmxLocation, HtmxReswap, Triggers};
use serde::Serialize;
use serde_json::Value;

/// URL carried by `HX-Push-Url` or `HX-Replace-Url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryUrl {
    /// An explicit URL.
    Url(String),
    /// The path and query of the request being answered, resolved at compile time.
    Current,
    /// The literal `false`: no history entry is created.
    Prevent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HistoryUpdate {
    Push(HistoryUrl),
    Replace(HistoryUrl),
}

#[derive(Debug, Clone, PartialEq)]
struct LocationDirective {
    location: HtmxLocation,
    current_url: bool,
}

/// A finished htmx response: fragments to render plus header directives.
///
/// Created through [`HtmxResponse::builder`]; immutable once built.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::HtmxResponse;
/// use htmx_axum_http::types::HtmxReswap;
///
/// let response = HtmxResponse::builder()
///     .fragment("todos :: list")
///     .trigger("todosChanged")
///     .push_url("/todos")
///     .reswap(HtmxReswap::outer_html())
///     .build()
///     .unwrap();
///
/// assert_eq!(response.fragments().len(), 1);
/// assert!(response.triggers().contains("todosChanged"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmxResponse {
    fragments: Vec<Fragment>,
    triggers: Triggers,
    triggers_after_settle: Triggers,
    triggers_after_swap: Triggers,
    history: Option<HistoryUpdate>,
    location: Option<LocationDirective>,
    redirect: Option<String>,
    refresh: bool,
    retarget: Option<String>,
    reselect: Option<String>,
    reswap: Option<HtmxReswap>,
}

impl HtmxResponse {
    /// Start building a response.
    #[must_use]
    pub fn builder() -> HtmxResponseBuilder {
        HtmxResponseBuilder::new()
    }

    /// Fragments in render order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Events for `HX-Trigger`.
    #[must_use]
    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// Events for `HX-Trigger-After-Settle`.
    #[must_use]
    pub fn triggers_after_settle(&self) -> &Triggers {
        &self.triggers_after_settle
    }

    /// Events for `HX-Trigger-After-Swap`.
    #[must_use]
    pub fn triggers_after_swap(&self) -> &Triggers {
        &self.triggers_after_swap
    }

    /// `HX-Push-Url` value, if set.
    #[must_use]
    pub fn push_url(&self) -> Option<&HistoryUrl> {
        match &self.history {
            Some(HistoryUpdate::Push(url)) => Some(url),
            _ => None,
        }
    }

    /// `HX-Replace-Url` value, if set.
    #[must_use]
    pub fn replace_url(&self) -> Option<&HistoryUrl> {
        match &self.history {
            Some(HistoryUpdate::Replace(url)) => Some(url),
            _ => None,
        }
    }

    /// `HX-Location` directive, if set.
    #[must_use]
    pub fn location(&self) -> Option<&HtmxLocation> {
        self.location.as_ref().map(|l| &l.location)
    }

    /// Whether the location path is the current request URL.
    #[must_use]
    pub fn location_uses_current_url(&self) -> bool {
        self.location.as_ref().is_some_and(|l| l.current_url)
    }

    /// `HX-Redirect` value, if set.
    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Whether `HX-Refresh: true` is sent.
    #[must_use]
    pub fn is_refresh(&self) -> bool {
        self.refresh
    }

    /// `HX-Retarget` value, if set.
    #[must_use]
    pub fn retarget(&self) -> Option<&str> {
        self.retarget.as_deref()
    }

    /// `HX-Reselect` value, if set.
    #[must_use]
    pub fn reselect(&self) -> Option<&str> {
        self.reselect.as_deref()
    }

    /// `HX-Reswap` value, if set.
    #[must_use]
    pub fn reswap(&self) -> Option<&HtmxReswap> {
        self.reswap.as_ref()
    }
}

/// Mutable construction phase of an [`HtmxResponse`].
#[derive(Debug, Default)]
pub struct HtmxResponseBuilder {
    response: HtmxResponse,
    error: Option<HtmxError>,
}

impl HtmxResponseBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the first contract violation; `build` reports it.
    fn fail(&mut self, error: HtmxError) {
        tracing::warn!(error = %error, "htmx response builder rejected an argument");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Returns `value` unless it is blank, in which case the violation is recorded.
    fn require(&mut self, what: &str, value: String) -> Option<String> {
        if value.trim().is_empty() {
            self.fail(HtmxError::invalid_argument(format!("{} must not be blank", what)));
            None
        } else {
            Some(value)
        }
    }

    fn detail(&mut self, detail: impl Serialize) -> Value {
        match serde_json::to_value(detail) {
            Ok(value) => value,
            Err(e) => {
                self.fail(HtmxError::Serialization(e));
                Value::Null
            }
        }
    }

    // ========== Fragments ==========

    /// Append a fragment unless one with the same view id was already added.
    ///
    /// The first occurrence wins and keeps its position.
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<Fragment>) -> Self {
        let fragment = fragment.into();
        if self.require("fragment view", fragment.view().to_string()).is_some() {
            push_unique(&mut self.response.fragments, fragment);
        }
        self
    }

    /// Append a fragment with already rendered content.
    #[must_use]
    pub fn inline_fragment(self, view: impl Into<String>, content: impl Into<String>) -> Self {
        self.fragment(Fragment::inline(view, content))
    }

    // ========== Triggers ==========

    /// Trigger `name` as soon as the response is received.
    #[must_use]
    pub fn trigger(mut self, name: impl Into<String>) -> Self {
        if let Some(name) = self.require("trigger event name", name.into()) {
            self.response.triggers.insert(name, Value::Null);
        }
        self
    }

    /// Trigger `name` with a detail payload as soon as the response is received.
    #[must_use]
    pub fn trigger_with_detail(mut self, name: impl Into<String>, detail: impl Serialize) -> Self {
        if let Some(name) = self.require("trigger event name", name.into()) {
            let detail = self.detail(detail);
            self.response.triggers.insert(name, detail);
        }
        self
    }

    /// Trigger `name` after the settle step.
    #[must_use]
    pub fn trigger_after_settle(mut self, name: impl Into<String>) -> Self {
        if let Some(name) = self.require("trigger event name", name.into()) {
            self.response.triggers_after_settle.insert(name, Value::Null);
        }
        self
    }

    /// Trigger `name` with a detail payload after the settle step.
    #[must_use]
    pub fn trigger_after_settle_with_detail(
        mut self,
        name: impl Into<String>,
        detail: impl Serialize,
    ) -> Self {
        if let Some(name) = self.require("trigger event name", name.into()) {
            let detail = self.detail(detail);
            self.response.triggers_after_settle.insert(name, detail);
        }
        self
    }

    /// Trigger `name` after the swap step.
    #[must_use]
    pub fn trigger_after_swap(mut self, name: impl Into<String>) -> Self {
        if let Some(name) = self.require("trigger event name", name.into()) {
            self.response.triggers_after_swap.insert(name, Value::Null);
        }
        self
    }

    /// Trigger `name` with a detail payload after the swap step.
    #[must_use]
    pub fn trigger_after_swap_with_detail(
        mut self,
        name: impl Into<String>,
        detail: impl Serialize,
    ) -> Self {
        if let Some(name) = self.require("trigger event name", name.into()) {
            let detail = self.detail(detail);
            self.response.triggers_after_swap.insert(name, detail);
        }
        self
    }

    // ========== History ==========

    /// Push `url` into the history stack. Clears any replace-url.
    #[must_use]
    pub fn push_url(mut self, url: impl Into<String>) -> Self {
        if let Some(url) = self.require("push url", url.into()) {
            self.response.history = Some(HistoryUpdate::Push(history_url(url)));
        }
        self
    }

    /// Push the URL of the current request into the history stack.
    #[must_use]
    pub fn push_current_url(mut self) -> Self {
        self.response.history = Some(HistoryUpdate::Push(HistoryUrl::Current));
        self
    }

    /// Replace the current location bar URL with `url`. Clears any push-url.
    #[must_use]
    pub fn replace_url(mut self, url: impl Into<String>) -> Self {
        if let Some(url) = self.require("replace url", url.into()) {
            self.response.history = Some(HistoryUpdate::Replace(history_url(url)));
        }
        self
    }

    /// Replace the location bar URL with the URL of the current request.
    #[must_use]
    pub fn replace_current_url(mut self) -> Self {
        self.response.history = Some(HistoryUpdate::Replace(HistoryUrl::Current));
        self
    }

    /// Prevent the browser history from being updated (`HX-Push-Url: false`).
    #[must_use]
    pub fn prevent_history_update(mut self) -> Self {
        self.response.history = Some(HistoryUpdate::Push(HistoryUrl::Prevent));
        self
    }

    // ========== Navigation ==========

    /// Navigate client-side without a full reload.
    ///
    /// Accepts a path or a full [`HtmxLocation`].
    #[must_use]
    pub fn location(mut self, location: impl Into<HtmxLocation>) -> Self {
        let location = location.into();
        if self.require("location path", location.path().to_string()).is_some() {
            self.response.location = Some(LocationDirective {
                location,
                current_url: false,
            });
        }
        self
    }

    /// Navigate client-side to the URL of the current request, with the context of
    /// `location` (its own path is ignored).
    #[must_use]
    pub fn location_current_url(mut self, location: HtmxLocation) -> Self {
        self.response.location = Some(LocationDirective {
            location,
            current_url: true,
        });
        self
    }

    /// Client-side redirect with a full page reload.
    #[must_use]
    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        if let Some(url) = self.require("redirect url", url.into()) {
            self.response.redirect = Some(url);
        }
        self
    }

    /// Full page refresh on the client.
    #[must_use]
    pub fn refresh(mut self) -> Self {
        self.response.refresh = true;
        self
    }

    // ========== Swapping ==========

    /// CSS selector replacing the target of the swap.
    #[must_use]
    pub fn retarget(mut self, selector: impl Into<String>) -> Self {
        if let Some(selector) = self.require("retarget selector", selector.into()) {
            self.response.retarget = Some(selector);
        }
        self
    }

    /// CSS selector choosing which part of the response is swapped in.
    #[must_use]
    pub fn reselect(mut self, selector: impl Into<String>) -> Self {
        if let Some(selector) = self.require("reselect selector", selector.into()) {
            self.response.reselect = Some(selector);
        }
        self
    }

    /// Override how the response is swapped.
    #[must_use]
    pub fn reswap(mut self, reswap: impl Into<HtmxReswap>) -> Self {
        self.response.reswap = Some(reswap.into());
        self
    }

    // ========== Composition ==========

    /// Fold a reusable partial response into this one.
    ///
    /// `other`'s fragments are appended after this builder's fragments, skipping view ids
    /// already present. Trigger sets are unioned with `other` winning on name collisions,
    /// and every directive `other` sets overrides this builder's.
    #[must_use]
    pub fn merge(mut self, other: &HtmxResponse) -> Self {
        let response = &mut self.response;

        for fragment in &other.fragments {
            push_unique(&mut response.fragments, fragment.clone());
        }

        response.triggers.extend(other.triggers.clone());
        response
            .triggers_after_settle
            .extend(other.triggers_after_settle.clone());
        response
            .triggers_after_swap
            .extend(other.triggers_after_swap.clone());

        if other.history.is_some() {
            response.history = other.history.clone();
        }
        if other.location.is_some() {
            response.location = other.location.clone();
        }
        if other.redirect.is_some() {
            response.redirect = other.redirect.clone();
        }
        if other.refresh {
            response.refresh = true;
        }
        if other.retarget.is_some() {
            response.retarget = other.retarget.clone();
        }
        if other.reselect.is_some() {
            response.reselect = other.reselect.clone();
        }
        if other.reswap.is_some() {
            response.reswap = other.reswap.clone();
        }

        self
    }

    /// Freeze the response.
    ///
    /// # Errors
    ///
    /// Returns the first contract violation recorded while building.
    pub fn build(self) -> Result<HtmxResponse> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}

fn push_unique(fragments: &mut Vec<Fragment>, fragment: Fragment) {
    if !fragments.iter().any(|f| f.view() == fragment.view()) {
        fragments.push(fragment);
    }
}

fn history_url(url: String) -> HistoryUrl {
    if url == constants::FALSE {
        HistoryUrl::Prevent
    } else {
        HistoryUrl::Url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn views(response: &HtmxResponse) -> Vec<&str> {
        response.fragments().iter().map(Fragment::view).collect()
    }

    #[test]
    fn test_duplicate_fragment_is_ignored() {
        let once = HtmxResponse::builder().fragment("a").build().unwrap();
        let twice = HtmxResponse::builder()
            .fragment("a")
            .fragment(Fragment::inline("a", "<p>later</p>"))
            .build()
            .unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.fragments()[0].content(), None);
    }

    #[test]
    fn test_fragment_order_preserved() {
        let response = HtmxResponse::builder()
            .fragment("b")
            .fragment("a")
            .fragment("c")
            .fragment("a")
            .build()
            .unwrap();
        assert_eq!(views(&response), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_trigger_last_write_wins() {
        let response = HtmxResponse::builder()
            .trigger_with_detail("saved", json!({"id": 1}))
            .trigger("saved")
            .trigger_after_swap_with_detail("swapped", 5)
            .build()
            .unwrap();

        assert_eq!(response.triggers().get("saved"), Some(&Value::Null));
        assert_eq!(response.triggers_after_swap().get("swapped"), Some(&json!(5)));
        assert!(response.triggers_after_settle().is_empty());
    }

    #[test]
    fn test_push_then_replace() {
        let response = HtmxResponse::builder()
            .push_url("/a")
            .replace_url("/b")
            .build()
            .unwrap();
        assert_eq!(response.push_url(), None);
        assert_eq!(response.replace_url(), Some(&HistoryUrl::Url("/b".into())));
    }

    #[test]
    fn test_replace_then_push() {
        let response = HtmxResponse::builder()
            .replace_url("/b")
            .push_url("/a")
            .build()
            .unwrap();
        assert_eq!(response.push_url(), Some(&HistoryUrl::Url("/a".into())));
        assert_eq!(response.replace_url(), None);
    }

    #[test]
    fn test_prevent_history_update() {
        let response = HtmxResponse::builder()
            .replace_url("/b")
            .prevent_history_update()
            .build()
            .unwrap();
        assert_eq!(response.push_url(), Some(&HistoryUrl::Prevent));
        assert_eq!(response.replace_url(), None);

        let literal = HtmxResponse::builder().push_url("false").build().unwrap();
        assert_eq!(literal.push_url(), Some(&HistoryUrl::Prevent));
    }

    #[test]
    fn test_blank_arguments_rejected() {
        let cases: Vec<HtmxResponseBuilder> = vec![
            HtmxResponse::builder().trigger(""),
            HtmxResponse::builder().trigger_after_settle("  "),
            HtmxResponse::builder().retarget(""),
            HtmxResponse::builder().reselect(" "),
            HtmxResponse::builder().push_url(""),
            HtmxResponse::builder().replace_url(""),
            HtmxResponse::builder().redirect(""),
            HtmxResponse::builder().location(""),
            HtmxResponse::builder().fragment(""),
        ];

        for builder in cases {
            assert!(matches!(builder.build(), Err(HtmxError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_first_error_is_kept() {
        let err = HtmxResponse::builder()
            .retarget("")
            .trigger("")
            .refresh()
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("retarget selector"));
    }

    #[test]
    fn test_unserializable_detail() {
        // JSON object keys must be strings
        let mut detail = HashMap::new();
        detail.insert(vec![1u8], "x");

        let result = HtmxResponse::builder()
            .trigger_with_detail("bad", detail)
            .build();
        assert!(matches!(result, Err(HtmxError::Serialization(_))));
    }

    #[test]
    fn test_singletons_last_write_wins() {
        let response = HtmxResponse::builder()
            .retarget("#a")
            .retarget("#b")
            .redirect("/x")
            .redirect("/y")
            .reswap(HtmxReswap::inner_html())
            .reswap(HtmxReswap::delete())
            .location("/one")
            .location(HtmxLocation::new("/two").target("#t"))
            .build()
            .unwrap();

        assert_eq!(response.retarget(), Some("#b"));
        assert_eq!(response.redirect(), Some("/y"));
        assert_eq!(response.reswap(), Some(&HtmxReswap::delete()));
        assert_eq!(response.location().map(HtmxLocation::path), Some("/two"));
        assert!(!response.location_uses_current_url());
    }

    #[test]
    fn test_merge() {
        let partial = HtmxResponse::builder()
            .fragment("toast")
            .fragment("list")
            .trigger_with_detail("shared", "right")
            .trigger("notify")
            .replace_url("/partial")
            .retarget("#toast")
            .build()
            .unwrap();

        let response = HtmxResponse::builder()
            .fragment("list")
            .fragment("header")
            .trigger_with_detail("shared", "left")
            .trigger("own")
            .push_url("/page")
            .retarget("#main")
            .reselect("#keep")
            .merge(&partial)
            .build()
            .unwrap();

        assert_eq!(views(&response), vec!["list", "header", "toast"]);
        assert_eq!(response.triggers().get("shared"), Some(&json!("right")));
        assert!(response.triggers().contains("own"));
        assert!(response.triggers().contains("notify"));
        assert_eq!(response.push_url(), None);
        assert_eq!(response.replace_url(), Some(&HistoryUrl::Url("/partial".into())));
        assert_eq!(response.retarget(), Some("#toast"));
        assert_eq!(response.reselect(), Some("#keep"));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let empty = HtmxResponse::builder().build().unwrap();
        let response = HtmxResponse::builder()
            .push_url("/kept")
            .refresh()
            .merge(&empty)
            .build()
            .unwrap();

        assert_eq!(response.push_url(), Some(&HistoryUrl::Url("/kept".into())));
        assert!(response.is_refresh());
    }
}
