//! Value types of the htmx header protocol.
//!
//! | Type | Header | Description |
//! |------|--------|-------------|
//! | [`HtmxReswap`] | `HX-Reswap` | Swap mode plus timing, scroll and show modifiers |
//! | [`HtmxLocation`] | `HX-Location` | Client-side navigation directive |
//! | [`Triggers`] | `HX-Trigger*` | Named events with optional detail payloads |
//! | [`Fragment`] | body | A view to render into the response |
//!
//! These types carry no request state and can be built ahead of time and reused.

mod fragment;
mod location;
mod reswap;
mod trigger;

pub use fragment::Fragment;
pub use location::HtmxLocation;
pub use reswap::{HtmxReswap, ScrollPosition, SwapMode};
pub use trigger::Triggers;
