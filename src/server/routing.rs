//! Dispatching one path to several handlers by htmx condition.
//!
//! # Usage
//!
//! ```ignore
//! use axum::{routing::{MethodFilter, Router}};
//! use htmx_axum_http::{HtmxCondition, HtmxRoutes};
//!
//! let contacts = HtmxRoutes::new()
//!     .route(HtmxCondition::none(), MethodFilter::GET, full_page)
//!     .route(HtmxCondition::htmx(), MethodFilter::GET, contact_list)
//!     .route(HtmxCondition::htmx().trigger_id("search"), MethodFilter::GET, search_results)
//!     .route(HtmxCondition::none(), MethodFilter::POST, create_contact)
//!     .with_state(app_state);
//!
//! let app = Router::new().route_service("/contacts", contacts);
//! ```
//!
//! Handlers may extract `State<S>`; the route set is then an `HtmxRoutes<S>` and has to be
//! given its state with [`HtmxRoutes::with_state`] before it can be installed.

use super::condition::{self, HtmxCondition};
use axum::{
    extract::Request,
    handler::Handler,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{self, MethodFilter, MethodRouter},
};
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Service, ServiceExt};

struct Candidate<S> {
    condition: HtmxCondition,
    methods: MethodFilter,
    handler: MethodRouter<S>,
}

impl<S> Clone for Candidate<S> {
    fn clone(&self) -> Self {
        Self {
            condition: self.condition.clone(),
            methods: self.methods,
            handler: self.handler.clone(),
        }
    }
}

/// Candidate handlers for a single path, each guarded by an [`HtmxCondition`] and a
/// [`MethodFilter`].
///
/// Candidates that do not accept the request method are discarded first. The remaining
/// conditions are checked and the best match (see the ranking rules on [`HtmxCondition`])
/// handles the request. When no candidate accepts the method the response is
/// `405 Method Not Allowed`; when none of those matches it is `404 Not Found`.
/// Candidates are fixed once the service is installed and are shared between clones.
pub struct HtmxRoutes<S = ()> {
    candidates: Arc<Vec<Candidate<S>>>,
}

impl<S> Clone for HtmxRoutes<S> {
    fn clone(&self) -> Self {
        Self {
            candidates: Arc::clone(&self.candidates),
        }
    }
}

impl<S> Default for HtmxRoutes<S> {
    fn default() -> Self {
        Self {
            candidates: Arc::new(Vec::new()),
        }
    }
}

impl<S> HtmxRoutes<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create an empty route set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for the methods in `methods`, guarded by `condition`.
    #[must_use]
    pub fn route<H, T>(
        mut self,
        condition: HtmxCondition,
        methods: MethodFilter,
        handler: H,
    ) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Arc::make_mut(&mut self.candidates).push(Candidate {
            condition,
            methods,
            handler: routing::on(methods, handler),
        });
        self
    }

    /// Provide the state for every registered handler.
    #[must_use]
    pub fn with_state<S2>(self, state: S) -> HtmxRoutes<S2> {
        let candidates = self
            .candidates
            .iter()
            .cloned()
            .map(|candidate| Candidate {
                condition: candidate.condition,
                methods: candidate.methods,
                handler: candidate.handler.with_state(state.clone()),
            })
            .collect();

        HtmxRoutes {
            candidates: Arc::new(candidates),
        }
    }
}

impl<S> HtmxRoutes<S> {
    /// Registered conditions in registration order.
    pub fn conditions(&self) -> impl Iterator<Item = &HtmxCondition> {
        self.candidates.iter().map(|candidate| &candidate.condition)
    }
}

impl HtmxRoutes<()> {
    fn select(&self, request: &Request) -> Result<MethodRouter, StatusCode> {
        let method = request.method();
        let eligible: Vec<&Candidate<()>> = self
            .candidates
            .iter()
            .filter(|candidate| accepts(candidate.methods, method))
            .collect();

        if eligible.is_empty() {
            return Err(StatusCode::METHOD_NOT_ALLOWED);
        }

        let index = condition::best_match(
            eligible.iter().map(|candidate| &candidate.condition),
            method,
            request.headers(),
        )
        .ok_or(StatusCode::NOT_FOUND)?;

        eligible
            .get(index)
            .map(|candidate| candidate.handler.clone())
            .ok_or(StatusCode::NOT_FOUND)
    }
}

/// `HEAD` is served by `GET` handlers, as axum's method routing does.
fn accepts(methods: MethodFilter, method: &Method) -> bool {
    let contains = |filter: MethodFilter| methods.or(filter) == methods;

    match MethodFilter::try_from(method.clone()) {
        Ok(filter) if contains(filter) => true,
        _ => *method == Method::HEAD && contains(MethodFilter::GET),
    }
}

impl<S> std::fmt::Debug for HtmxRoutes<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmxRoutes")
            .field("conditions", &self.conditions().collect::<Vec<_>>())
            .finish()
    }
}

impl Service<Request> for HtmxRoutes<()> {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        match self.select(&request) {
            Ok(handler) => Box::pin(handler.oneshot(request)),
            Err(status) => {
                tracing::warn!(
                    method = %request.method(),
                    uri = %request.uri(),
                    status = %status,
                    "no htmx route candidate accepted the request"
                );
                Box::pin(async move { Ok(status.into_response()) })
            }
        }
    }
}
