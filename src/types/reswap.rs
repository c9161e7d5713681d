//! The `HX-Reswap` swap specification.
//!
//! # Wire Format
//!
//! ```text
//! <mode> [transition:<bool>] [focus-scroll:<bool>] [swap:<n>ms] [settle:<n>ms]
//!        [scroll:[<selector>:]<top|bottom>] [show:[<selector>:]<top|bottom>]
//! ```
//!
//! Modifiers are always written in the order above and only when set. Parsing accepts
//! modifiers in any order.

use crate::error::{HtmxError, Result};
use crate::protocol;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the response content is swapped into the target element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapMode {
    /// Replace the inner html of the target element.
    #[default]
    #[serde(rename = "innerHTML")]
    InnerHtml,
    /// Replace the entire target element.
    #[serde(rename = "outerHTML")]
    OuterHtml,
    /// Insert before the target element.
    #[serde(rename = "beforebegin")]
    BeforeBegin,
    /// Insert before the first child of the target element.
    #[serde(rename = "afterbegin")]
    AfterBegin,
    /// Insert after the last child of the target element.
    #[serde(rename = "beforeend")]
    BeforeEnd,
    /// Insert after the target element.
    #[serde(rename = "afterend")]
    AfterEnd,
    /// Delete the target element regardless of the response.
    #[serde(rename = "delete")]
    Delete,
    /// Do not swap; out-of-band items are still processed.
    #[serde(rename = "none")]
    None,
}

impl SwapMode {
    /// The wire token for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InnerHtml => "innerHTML",
            Self::OuterHtml => "outerHTML",
            Self::BeforeBegin => "beforebegin",
            Self::AfterBegin => "afterbegin",
            Self::BeforeEnd => "beforeend",
            Self::AfterEnd => "afterend",
            Self::Delete => "delete",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SwapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapMode {
    type Err = HtmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "innerHTML" => Ok(Self::InnerHtml),
            "outerHTML" => Ok(Self::OuterHtml),
            "beforebegin" => Ok(Self::BeforeBegin),
            "afterbegin" => Ok(Self::AfterBegin),
            "beforeend" => Ok(Self::BeforeEnd),
            "afterend" => Ok(Self::AfterEnd),
            "delete" => Ok(Self::Delete),
            "none" => Ok(Self::None),
            other => Err(HtmxError::HeaderParse(format!("Unknown swap mode: {}", other))),
        }
    }
}

/// Scroll or show position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPosition {
    /// Top of the element.
    Top,
    /// Bottom of the element.
    Bottom,
}

impl ScrollPosition {
    /// The wire token for this position.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for ScrollPosition {
    type Err = HtmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(HtmxError::HeaderParse(format!(
                "Invalid scroll position: {}",
                other
            ))),
        }
    }
}

/// A complete `HX-Reswap` value: a [`SwapMode`] plus optional modifiers.
///
/// Two specs are equal when their fields are equal; the [`Display`](fmt::Display) output is a
/// pure function of the fields.
///
/// # Examples
///
/// ```
/// use htmx_axum_http::types::{HtmxReswap, ScrollPosition};
/// use std::time::Duration;
///
/// let reswap = HtmxReswap::inner_html().swap(Duration::from_millis(300));
/// assert_eq!(reswap.to_string(), "innerHTML swap:300ms");
///
/// let reswap = HtmxReswap::outer_html().scroll_target("#t", ScrollPosition::Top);
/// assert_eq!(reswap.to_string(), "outerHTML scroll:#t:top");
///
/// let parsed: HtmxReswap = "outerHTML scroll:#t:top".parse().unwrap();
/// assert_eq!(parsed, reswap);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmxReswap {
    mode: SwapMode,
    swap_delay: Option<Duration>,
    settle_delay: Option<Duration>,
    scroll: Option<ScrollPosition>,
    scroll_target: Option<String>,
    show: Option<ScrollPosition>,
    show_target: Option<String>,
    transition: bool,
    focus_scroll: Option<bool>,
}

impl HtmxReswap {
    /// Create a swap specification with the given mode and no modifiers.
    #[must_use]
    pub fn new(mode: SwapMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// `innerHTML`
    #[must_use]
    pub fn inner_html() -> Self {
        Self::new(SwapMode::InnerHtml)
    }

    /// `outerHTML`
    #[must_use]
    pub fn outer_html() -> Self {
        Self::new(SwapMode::OuterHtml)
    }

    /// `beforebegin`
    #[must_use]
    pub fn before_begin() -> Self {
        Self::new(SwapMode::BeforeBegin)
    }

    /// `afterbegin`
    #[must_use]
    pub fn after_begin() -> Self {
        Self::new(SwapMode::AfterBegin)
    }

    /// `beforeend`
    #[must_use]
    pub fn before_end() -> Self {
        Self::new(SwapMode::BeforeEnd)
    }

    /// `afterend`
    #[must_use]
    pub fn after_end() -> Self {
        Self::new(SwapMode::AfterEnd)
    }

    /// `delete`
    #[must_use]
    pub fn delete() -> Self {
        Self::new(SwapMode::Delete)
    }

    /// `none`
    #[must_use]
    pub fn none() -> Self {
        Self::new(SwapMode::None)
    }

    /// Delay between receiving the response and swapping it in.
    #[must_use]
    pub fn swap(mut self, delay: Duration) -> Self {
        self.swap_delay = Some(delay);
        self
    }

    /// Delay between the swap and the settle step.
    #[must_use]
    pub fn settle(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    /// Scroll the target element to `position` after the swap.
    #[must_use]
    pub fn scroll(mut self, position: ScrollPosition) -> Self {
        self.scroll = Some(position);
        self.scroll_target = None;
        self
    }

    /// Scroll the element matching `selector` to `position` after the swap.
    #[must_use]
    pub fn scroll_target(mut self, selector: impl Into<String>, position: ScrollPosition) -> Self {
        self.scroll = Some(position);
        self.scroll_target = Some(selector.into());
        self
    }

    /// Show the target element at `position` after the swap.
    #[must_use]
    pub fn show(mut self, position: ScrollPosition) -> Self {
        self.show = Some(position);
        self.show_target = None;
        self
    }

    /// Show the element matching `selector` at `position` after the swap.
    #[must_use]
    pub fn show_target(mut self, selector: impl Into<String>, position: ScrollPosition) -> Self {
        self.show = Some(position);
        self.show_target = Some(selector.into());
        self
    }

    /// Use the View Transitions API for the swap.
    #[must_use]
    pub fn transition(mut self) -> Self {
        self.transition = true;
        self
    }

    /// Enable or disable scrolling to focused elements.
    #[must_use]
    pub fn focus_scroll(mut self, enabled: bool) -> Self {
        self.focus_scroll = Some(enabled);
        self
    }

    /// The swap mode.
    #[must_use]
    pub fn mode(&self) -> SwapMode {
        self.mode
    }

    /// Swap delay, if set.
    #[must_use]
    pub fn swap_delay(&self) -> Option<Duration> {
        self.swap_delay
    }

    /// Settle delay, if set.
    #[must_use]
    pub fn settle_delay(&self) -> Option<Duration> {
        self.settle_delay
    }

    /// Scroll position and optional selector.
    #[must_use]
    pub fn scroll_position(&self) -> Option<(ScrollPosition, Option<&str>)> {
        self.scroll.map(|p| (p, self.scroll_target.as_deref()))
    }

    /// Show position and optional selector.
    #[must_use]
    pub fn show_position(&self) -> Option<(ScrollPosition, Option<&str>)> {
        self.show.map(|p| (p, self.show_target.as_deref()))
    }

    /// Whether view transitions are enabled.
    #[must_use]
    pub fn is_transition(&self) -> bool {
        self.transition
    }

    /// Focus-scroll setting, if set.
    #[must_use]
    pub fn focus_scroll_setting(&self) -> Option<bool> {
        self.focus_scroll
    }
}

impl From<SwapMode> for HtmxReswap {
    fn from(mode: SwapMode) -> Self {
        Self::new(mode)
    }
}

fn write_position(
    f: &mut fmt::Formatter<'_>,
    key: &str,
    position: ScrollPosition,
    target: Option<&str>,
) -> fmt::Result {
    match target {
        Some(target) => write!(f, " {}:{}:{}", key, target, position.as_str()),
        None => write!(f, " {}:{}", key, position.as_str()),
    }
}

impl fmt::Display for HtmxReswap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode.as_str())?;

        if self.transition {
            f.write_str(" transition:true")?;
        }
        if let Some(focus_scroll) = self.focus_scroll {
            write!(f, " focus-scroll:{}", focus_scroll)?;
        }
        if let Some(delay) = self.swap_delay {
            write!(f, " swap:{}", protocol::format_duration(delay))?;
        }
        if let Some(delay) = self.settle_delay {
            write!(f, " settle:{}", protocol::format_duration(delay))?;
        }
        if let Some(position) = self.scroll {
            write_position(f, "scroll", position, self.scroll_target.as_deref())?;
        }
        if let Some(position) = self.show {
            write_position(f, "show", position, self.show_target.as_deref())?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| HtmxError::HeaderParse(format!("Invalid {} value: {}", key, value)))
}

/// Split `[selector:]position`; the selector itself may contain `:`.
fn parse_position(value: &str) -> Result<(ScrollPosition, Option<String>)> {
    match value.rsplit_once(':') {
        Some((target, position)) if !target.is_empty() => {
            Ok((position.parse()?, Some(target.to_string())))
        }
        _ => Ok((value.parse()?, None)),
    }
}

impl FromStr for HtmxReswap {
    type Err = HtmxError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let mode = tokens
            .next()
            .ok_or_else(|| HtmxError::HeaderParse("Empty swap specification".to_string()))?
            .parse::<SwapMode>()?;

        let mut reswap = HtmxReswap::new(mode);

        for token in tokens {
            let (key, value) = token.split_once(':').ok_or_else(|| {
                HtmxError::HeaderParse(format!("Invalid swap modifier: {}", token))
            })?;

            match key {
                "transition" => reswap.transition = parse_bool(key, value)?,
                "focus-scroll" => reswap.focus_scroll = Some(parse_bool(key, value)?),
                "swap" => reswap.swap_delay = Some(protocol::parse_duration(value)?),
                "settle" => reswap.settle_delay = Some(protocol::parse_duration(value)?),
                "scroll" => {
                    let (position, target) = parse_position(value)?;
                    reswap.scroll = Some(position);
                    reswap.scroll_target = target;
                }
                "show" => {
                    let (position, target) = parse_position(value)?;
                    reswap.show = Some(position);
                    reswap.show_target = target;
                }
                _ => {
                    return Err(HtmxError::HeaderParse(format!(
                        "Unknown swap modifier: {}",
                        key
                    )))
                }
            }
        }

        Ok(reswap)
    }
}
