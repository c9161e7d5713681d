//! Basic htmx server example
//!
//! A counter page: the full page is served to the browser, the increment button posts
//! with htmx and receives only the counter fragment plus an `HX-Trigger` event.
//!
//! Run with: cargo run --example server_basic

use axum::{
    extract::State,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post, Router},
};
use htmx_axum_http::{
    HtmxLayer, HtmxRequest, HtmxResponse, InlineRenderer, ResponseCompiler, ServerConfig,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

#[derive(Clone, Default)]
pub struct AppState {
    count: Arc<RwLock<u64>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("server_basic=debug,htmx_axum_http=debug,tower_http=info")
        .init();

    let config = ServerConfig {
        enable_logging: true,
        ..Default::default()
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/increment", post(increment))
        .layer(middleware::from_fn(HtmxLayer::with_config(config).middleware()))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn counter(count: u64) -> String {
    format!(r#"<span id="counter">{count}</span>"#)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let count = *state.count.read().await;
    Html(format!(
        r##"<!doctype html>
<html>
<head><script src="https://unpkg.com/htmx.org@2.0.4"></script></head>
<body>
  <h1>Counter</h1>
  {}
  <button hx-post="/increment" hx-target="#counter" hx-swap="outerHTML">+1</button>
</body>
</html>"##,
        counter(count)
    ))
}

async fn increment(
    State(state): State<AppState>,
    htmx: HtmxRequest,
    compiler: ResponseCompiler,
) -> htmx_axum_http::Result<Response> {
    let count = {
        let mut count = state.count.write().await;
        *count += 1;
        *count
    };

    if !htmx.is_htmx_request {
        return Ok(Html(counter(count)).into_response());
    }

    let response = HtmxResponse::builder()
        .inline_fragment("counter", counter(count))
        .trigger_with_detail("counterChanged", json!({ "count": count }))
        .build()?;
    compiler.compile(&response)?.render(&InlineRenderer)
}
