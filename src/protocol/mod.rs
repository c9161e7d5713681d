//! Protocol constants and header codecs for htmx.
//!
//! - [`constants`] - header names and literal values
//! - header codecs - [`format_trigger_header`], [`format_location_header`],
//!   [`format_duration`], [`parse_duration`], [`decode_uri_component`]
//!
//! The `HX-Reswap` codec lives on [`HtmxReswap`](crate::types::HtmxReswap) itself
//! (`Display` / `FromStr`).

pub mod constants;
mod headers;

pub use headers::*;
