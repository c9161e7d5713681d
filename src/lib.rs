#![warn(missing_docs)]

//! # htmx for Axum
//!
//! This crate implements the server side of the [htmx](https://htmx.org) header protocol:
//! a fixed vocabulary of `HX-*` request and response headers that lets a server drive
//! partial page updates in an htmx-enabled browser.
//!
//! ## Overview
//!
//! 1. **Request context** - [`HtmxRequest`] parses `HX-Request`, `HX-Target`, `HX-Trigger`, ...
//! 2. **Response composition** - [`HtmxResponse`] accumulates fragments, trigger events and
//!    directives (push/replace URL, location, redirect, refresh, retarget, reselect, reswap)
//! 3. **Compilation** - [`ResponseCompiler`] turns a response into ordered headers and
//!    fragments, resolving URLs against the application's context path
//! 4. **Route conditions** - [`HtmxCondition`] and [`HtmxRoutes`] dispatch one path to
//!    different handlers depending on the htmx headers of the request
//!
//! ## Headers
//!
//! | Header | Direction | Value |
//! |--------|-----------|-------|
//! | `HX-Request`, `HX-Boosted`, `HX-History-Restore-Request` | in | presence flag |
//! | `HX-Current-URL`, `HX-Prompt`, `HX-Target`, `HX-Trigger-Name`, `HX-Trigger` | in | string |
//! | `HX-Trigger`, `HX-Trigger-After-Settle`, `HX-Trigger-After-Swap` | out | names or JSON object |
//! | `HX-Location` | out | path or JSON object |
//! | `HX-Push-Url`, `HX-Replace-Url` | out | URL or `false` |
//! | `HX-Redirect`, `HX-Retarget`, `HX-Reselect` | out | string |
//! | `HX-Refresh` | out | `true` |
//! | `HX-Reswap` | out | swap specification |
//!
//! ## Server Usage
//!
//! ```ignore
//! use axum::{middleware, routing::get, Router};
//! use htmx_axum_http::{HtmxLayer, HtmxRequest, HtmxResponse, InlineRenderer, ResponseCompiler};
//!
//! async fn list(htmx: HtmxRequest, compiler: ResponseCompiler) -> htmx_axum_http::Result<Response> {
//!     let response = HtmxResponse::builder()
//!         .inline_fragment("list", "<ul><li>one</li></ul>")
//!         .trigger_with_detail("listLoaded", serde_json::json!({"count": 1}))
//!         .push_url("/list")
//!         .build()?;
//!     compiler.compile(&response)?.render(&InlineRenderer)
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .route("/list", get(list))
//!         .layer(middleware::from_fn(HtmxLayer::new().middleware()));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Protocol value types (reswap, location, triggers, fragments)
//! - **[error]** - Error types and result handling
//! - **[server]** - Axum integration: extractors, builder, compiler, conditions, middleware
//! - **[protocol]** - Header names and wire codecs

pub mod error;
pub mod protocol;
pub mod server;
pub mod types;

pub use error::{HtmxError, Result};
pub use server::{
    CompiledResponse, FragmentRenderer, HistoryUrl, HtmxCondition, HtmxLayer, HtmxRequest,
    HtmxResponse, HtmxResponseBuilder, HtmxRoutes, InlineRenderer, RedirectStrategy,
    ResponseCompiler, ServerConfig,
};
pub use types::{Fragment, HtmxLocation, HtmxReswap, ScrollPosition, SwapMode, Triggers};

#[cfg(test)]
mod tests;
