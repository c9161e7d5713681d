//! Axum server integration for htmx.
//!
//! # Data flow
//!
//! ```text
//! request headers ─► HtmxLayer ─► HtmxRequest (extractor)
//!                                        │
//!                     handler ◄──────────┘
//!                        │ HtmxResponse::builder() ... .build()
//!                        ▼
//!              ResponseCompiler::compile ─► CompiledResponse (headers + fragments)
//!                                                  │ render(&renderer)
//!                                                  ▼
//!                                               Response
//! ```
//!
//! Route dispatch by htmx headers happens before the handler runs: see [`HtmxRoutes`] and
//! [`HtmxCondition`].

mod compile;
mod condition;
mod config;
mod middleware;
mod redirect;
mod request;
mod response;
mod routing;

pub use compile::{CompiledResponse, FragmentRenderer, InlineRenderer, ResponseCompiler};
pub use condition::{best_match, is_preflight, HtmxCondition};
pub use config::ServerConfig;
pub use middleware::HtmxLayer;
pub use redirect::RedirectStrategy;
pub use request::HtmxRequest;
pub use response::{HistoryUrl, HtmxResponse, HtmxResponseBuilder};
pub use routing::HtmxRoutes;
