//! Condition-based dispatch example
//!
//! One `/contacts` path served by three handlers: the full page for plain requests, the
//! table body for htmx requests, and search results when the search input triggered the
//! request.
//!
//! Run with: cargo run --example server_conditions

use axum::{
    middleware,
    response::{Html, Response},
    routing::{post, MethodFilter, Router},
};
use htmx_axum_http::{
    HtmxCondition, HtmxLayer, HtmxRequest, HtmxResponse, HtmxReswap, HtmxRoutes,
    InlineRenderer, RedirectStrategy, ResponseCompiler,
};
use tower_http::trace::TraceLayer;

const CONTACTS: &[&str] = &["Ada Lovelace", "Alan Turing", "Grace Hopper"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("server_conditions=debug,htmx_axum_http=trace,tower_http=info")
        .init();

    let contacts: HtmxRoutes = HtmxRoutes::new()
        .route(HtmxCondition::none(), MethodFilter::GET, page)
        .route(HtmxCondition::htmx(), MethodFilter::GET, rows)
        .route(
            HtmxCondition::htmx().trigger_id("search"),
            MethodFilter::GET,
            search,
        );

    let app = Router::new()
        .route_service("/contacts", contacts)
        .route("/logout", post(logout))
        .layer(middleware::from_fn(HtmxLayer::new().middleware()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn table_rows(filter: &str) -> String {
    CONTACTS
        .iter()
        .filter(|name| name.to_lowercase().contains(&filter.to_lowercase()))
        .map(|name| format!("<tr><td>{name}</td></tr>"))
        .collect()
}

async fn page() -> Html<String> {
    Html(format!(
        r##"<!doctype html>
<html>
<head><script src="https://unpkg.com/htmx.org@2.0.4"></script></head>
<body>
  <input id="search" name="q" hx-get="/contacts" hx-trigger="keyup changed delay:300ms"
         hx-target="#rows">
  <table><tbody id="rows">{}</tbody></table>
  <button hx-post="/logout">Log out</button>
</body>
</html>"##,
        table_rows("")
    ))
}

async fn rows(compiler: ResponseCompiler) -> htmx_axum_http::Result<Response> {
    let response = HtmxResponse::builder()
        .inline_fragment("rows", table_rows(""))
        .build()?;
    compiler.compile(&response)?.render(&InlineRenderer)
}

async fn search(
    compiler: ResponseCompiler,
    axum::extract::Query(query): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> htmx_axum_http::Result<Response> {
    let filter = query.get("q").map(String::as_str).unwrap_or_default();
    let response = HtmxResponse::builder()
        .inline_fragment("rows", table_rows(filter))
        .reswap(HtmxReswap::inner_html().settle(std::time::Duration::from_millis(100)))
        .replace_current_url()
        .trigger("contactsFiltered")
        .build()?;
    compiler.compile(&response)?.render(&InlineRenderer)
}

async fn logout(htmx: HtmxRequest, compiler: ResponseCompiler) -> htmx_axum_http::Result<Response> {
    RedirectStrategy::HxRedirect.redirect(&htmx, &compiler, "/contacts")
}
