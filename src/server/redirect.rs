//! Turning a redirect decision into an htmx-aware response.
//!
//! A plain `302`/`303` is followed transparently by the browser's XHR, so htmx would swap
//! the redirect target into the page. For htmx requests the redirect is expressed as a
//! response header instead; other requests get a regular `303 See Other`.

use super::compile::ResponseCompiler;
use super::request::HtmxRequest;
use super::response::HtmxResponse;
use crate::error::{HtmxError, Result};
use crate::protocol;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// How an htmx request is sent to another URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedirectStrategy {
    /// `HX-Redirect`: full page load of the URL.
    #[default]
    HxRedirect,
    /// `HX-Location`: client-side navigation without a reload.
    HxLocation,
    /// `HX-Refresh: true`: reload the current page, the URL is ignored.
    HxRefresh,
}

impl RedirectStrategy {
    /// Build the redirect response for `request`.
    ///
    /// Absolute URLs are resolved against the compiler's context path.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or cannot be written as a header.
    pub fn redirect(
        &self,
        request: &HtmxRequest,
        compiler: &ResponseCompiler,
        url: &str,
    ) -> Result<Response> {
        if url.trim().is_empty() && *self != RedirectStrategy::HxRefresh {
            return Err(HtmxError::invalid_argument("redirect URL must not be blank"));
        }
        let url = compiler.resolve_url(url);

        if !request.is_htmx_request {
            let location = protocol::to_header_value(&header::LOCATION, &url)?;
            return Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response());
        }

        let response = match self {
            RedirectStrategy::HxRedirect => HtmxResponse::builder().redirect(url),
            RedirectStrategy::HxLocation => HtmxResponse::builder().location(url),
            RedirectStrategy::HxRefresh => HtmxResponse::builder().refresh(),
        }
        .build()?;

        let compiled = compiler.compile(&response)?;
        Ok((StatusCode::OK, compiled, ()).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::ServerConfig;

    fn compiler() -> ResponseCompiler {
        let config = ServerConfig {
            context_path: "/app".to_string(),
            ..Default::default()
        };
        ResponseCompiler::new(&config, "/login")
    }

    fn htmx() -> HtmxRequest {
        HtmxRequest {
            is_htmx_request: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_request_gets_see_other() {
        let response = RedirectStrategy::HxRedirect
            .redirect(&HtmxRequest::empty(), &compiler(), "/home")
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/app/home");
    }

    #[test]
    fn test_hx_redirect() {
        let response = RedirectStrategy::HxRedirect
            .redirect(&htmx(), &compiler(), "/home")
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-redirect"], "/app/home");
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_hx_location() {
        let response = RedirectStrategy::HxLocation
            .redirect(&htmx(), &compiler(), "/home")
            .unwrap();
        assert_eq!(response.headers()["hx-location"], "/app/home");
    }

    #[test]
    fn test_hx_refresh() {
        let response = RedirectStrategy::HxRefresh
            .redirect(&htmx(), &compiler(), "/ignored")
            .unwrap();
        assert_eq!(response.headers()["hx-refresh"], "true");
    }

    #[test]
    fn test_blank_url() {
        assert!(RedirectStrategy::HxRedirect
            .redirect(&htmx(), &compiler(), "")
            .is_err());
        assert!(RedirectStrategy::HxLocation
            .redirect(&HtmxRequest::empty(), &compiler(), "  ")
            .is_err());
    }

    #[test]
    fn test_invalid_header_value() {
        let err = RedirectStrategy::HxRedirect
            .redirect(&HtmxRequest::empty(), &compiler(), "/a\nb")
            .unwrap_err();
        assert!(matches!(err, crate::HtmxError::InvalidHeaderValue { .. }));
    }
}
