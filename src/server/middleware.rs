//! Axum middleware for htmx protocol support.
//!
//! # Usage
//!
//! ```ignore
//! use axum::{middleware, routing::get, Router};
//! use htmx_axum_http::HtmxLayer;
//!
//! let app = Router::new()
//!     .route("/items", get(handler))
//!     .layer(middleware::from_fn(HtmxLayer::new().middleware()));
//! ```
//!
//! # How It Works
//!
//! The middleware:
//! 1. Parses the htmx request headers into an [`HtmxRequest`]
//! 2. Attaches it, and the [`ServerConfig`], to the request extensions
//! 3. Handlers extract [`HtmxRequest`] and [`ResponseCompiler`](super::ResponseCompiler),
//!    which pick both up
//!
//! Without the layer the extractors still work: they parse headers on demand and use the
//! default configuration.

use super::config::ServerConfig;
use super::request::HtmxRequest;
use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::Arc;

/// Axum middleware layer for htmx support.
///
/// # Configuration
///
/// ```ignore
/// use htmx_axum_http::{HtmxLayer, ServerConfig};
///
/// let layer = HtmxLayer::with_config(ServerConfig {
///     context_path: "/app".to_string(),
///     ..Default::default()
/// });
/// ```
#[derive(Clone, Debug, Default)]
pub struct HtmxLayer {
    config: Arc<ServerConfig>,
}

impl HtmxLayer {
    /// Create a layer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer with a custom configuration.
    #[must_use]
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Get a reference to the layer's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Create the middleware function for use with [`axum::middleware::from_fn`].
    #[must_use]
    pub fn middleware(
        &self,
    ) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
           + Send
           + Sync
           + Clone {
        let config = self.config.clone();

        move |mut req: Request, next: Next| {
            let config = config.clone();
            Box::pin(async move {
                let htmx = HtmxRequest::from_headers(req.headers());
                if config.enable_logging && htmx.is_htmx_request {
                    tracing::debug!(
                        uri = %req.uri(),
                        target = ?htmx.target,
                        trigger = ?htmx.trigger_id,
                        boosted = htmx.boosted,
                        "htmx request"
                    );
                }
                req.extensions_mut().insert(Arc::new(htmx));
                req.extensions_mut().insert(config);
                next.run(req).await
            })
        }
    }
}
