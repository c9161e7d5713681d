//! End-to-end tests through an axum router.

use crate::{
    HtmxCondition, HtmxLayer, HtmxRequest, HtmxResponse, HtmxRoutes, InlineRenderer,
    RedirectStrategy, ResponseCompiler, Result, ServerConfig,
};
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, MethodFilter},
    Router,
};
use http::request::Parts;
use tower::ServiceExt;

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_request(uri: &str, headers: &[(&str, &str)]) -> Request {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn list(htmx: HtmxRequest, compiler: ResponseCompiler) -> Result<Response> {
    let target = htmx.target.unwrap_or_default();
    let response = HtmxResponse::builder()
        .inline_fragment("list", format!("<ul data-target=\"{target}\"></ul>"))
        .trigger("listLoaded")
        .push_current_url()
        .build()?;
    compiler.compile(&response)?.render(&InlineRenderer)
}

async fn failing() -> Result<Response> {
    let response = HtmxResponse::builder().retarget("").build()?;
    Ok(response.fragments().len().to_string().into_response())
}

async fn login(htmx: HtmxRequest, compiler: ResponseCompiler) -> Result<Response> {
    RedirectStrategy::HxRedirect.redirect(&htmx, &compiler, "/login")
}

fn app(config: ServerConfig) -> Router {
    Router::new()
        .route("/list", get(list))
        .route("/failing", get(failing))
        .route("/secure", get(login))
        .layer(middleware::from_fn(HtmxLayer::with_config(config).middleware()))
}

#[tokio::test]
async fn test_handler_compiles_headers_and_body() {
    let response = app(ServerConfig::default())
        .oneshot(get_request(
            "/list?page=2",
            &[("hx-request", "true"), ("hx-target", "main")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["hx-trigger"], "listLoaded");
    assert_eq!(response.headers()["hx-push-url"], "/list?page=2");
    assert_eq!(body_string(response).await, "<ul data-target=\"main\"></ul>");
}

#[tokio::test]
async fn test_context_path_from_layer_config() {
    let config = ServerConfig {
        context_path: "/app/".to_string(),
        ..Default::default()
    };
    let response = app(config)
        .oneshot(get_request("/list", &[("hx-request", "true")]))
        .await
        .unwrap();

    assert_eq!(response.headers()["hx-push-url"], "/app/list");
}

#[tokio::test]
async fn test_builder_error_becomes_server_error() {
    let response = app(ServerConfig::default())
        .oneshot(get_request("/failing", &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_redirect_depends_on_htmx_header() {
    let config = ServerConfig {
        context_path: "/app".to_string(),
        ..Default::default()
    };

    let plain = app(config.clone())
        .oneshot(get_request("/secure", &[]))
        .await
        .unwrap();
    assert_eq!(plain.status(), StatusCode::SEE_OTHER);
    assert_eq!(plain.headers()["location"], "/app/login");

    let htmx = app(config)
        .oneshot(get_request("/secure", &[("hx-request", "true")]))
        .await
        .unwrap();
    assert_eq!(htmx.status(), StatusCode::OK);
    assert_eq!(htmx.headers()["hx-redirect"], "/app/login");
}

fn request(method: Method, uri: &str, headers: &[(&str, &str)]) -> Request {
    let mut request = get_request(uri, headers);
    *request.method_mut() = method;
    request
}

fn preflight(uri: &str) -> Request {
    request(
        Method::OPTIONS,
        uri,
        &[
            ("origin", "https://example.com"),
            ("access-control-request-method", "POST"),
        ],
    )
}

fn contacts() -> Router {
    let routes: HtmxRoutes = HtmxRoutes::new()
        .route(HtmxCondition::none(), MethodFilter::GET, || async { "page" })
        .route(HtmxCondition::htmx(), MethodFilter::GET, || async { "partial" })
        .route(
            HtmxCondition::htmx().trigger_id("search"),
            MethodFilter::GET,
            || async { "search" },
        )
        .route(
            HtmxCondition::htmx().target("rows").trigger_id("search"),
            MethodFilter::GET,
            || async { "search rows" },
        );
    Router::new().route_service("/contacts", routes)
}

#[tokio::test]
async fn test_routes_dispatch_by_condition() {
    let cases: Vec<(Vec<(&str, &str)>, &str)> = vec![
        (vec![], "page"),
        (vec![("hx-request", "true")], "partial"),
        (vec![("hx-request", "true"), ("hx-trigger", "search")], "search"),
        (
            vec![
                ("hx-request", "true"),
                ("hx-trigger", "search"),
                ("hx-target", "rows"),
            ],
            "search rows",
        ),
        (vec![("hx-request", "true"), ("hx-trigger", "other")], "partial"),
    ];

    for (headers, expected) in cases {
        let response = contacts()
            .oneshot(get_request("/contacts", &headers))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, expected, "headers: {headers:?}");
    }
}

#[tokio::test]
async fn test_routes_without_match_is_not_found() {
    let routes: HtmxRoutes = HtmxRoutes::new().route(
        HtmxCondition::htmx().target("bar"),
        MethodFilter::GET,
        || async { "bar" },
    );
    let app = Router::new().route_service("/items", routes);

    let response = app
        .clone()
        .oneshot(get_request(
            "/items",
            &[("hx-request", "true"), ("hx-target", "foo")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            "/items",
            &[("hx-request", "true"), ("hx-target", "bar")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(get_request(
            "/items",
            &[("hx-request", "true"), ("hx-target", "bar")],
        ))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "bar");
}

#[tokio::test]
async fn test_routes_rank_only_candidates_for_the_method() {
    let routes: HtmxRoutes = HtmxRoutes::new()
        .route(HtmxCondition::none(), MethodFilter::POST, || async { "submit" })
        .route(HtmxCondition::htmx(), MethodFilter::GET, || async { "partial" });
    let app = Router::new().route_service("/form", routes);

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/form", &[("hx-request", "true")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "submit");

    let response = app
        .oneshot(get_request("/form", &[("hx-request", "true")]))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "partial");
}

#[tokio::test]
async fn test_routes_let_preflight_through() {
    let routes: HtmxRoutes = HtmxRoutes::new().route(
        HtmxCondition::htmx().target("bar"),
        MethodFilter::OPTIONS,
        || async { "preflight" },
    );
    let app = Router::new().route_service("/items", routes);

    let response = app.oneshot(preflight("/items")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "preflight");
}

#[tokio::test]
async fn test_preflight_ignores_declared_values() {
    let routes: HtmxRoutes = HtmxRoutes::new()
        .route(HtmxCondition::htmx().value("a"), MethodFilter::GET, || async { "a" })
        .route(HtmxCondition::none(), MethodFilter::OPTIONS, || async { "cors" })
        .route(
            HtmxCondition::htmx().target("t"),
            MethodFilter::OPTIONS,
            || async { "t" },
        );
    let app = Router::new().route_service("/items", routes);

    let response = app.oneshot(preflight("/items")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "cors");
}

#[derive(Clone)]
struct Greeting(&'static str);

#[tokio::test]
async fn test_routes_with_state() {
    use axum::extract::State;

    let routes: HtmxRoutes = HtmxRoutes::<Greeting>::new()
        .route(
            HtmxCondition::htmx(),
            MethodFilter::GET,
            |State(greeting): State<Greeting>| async move { greeting.0 },
        )
        .with_state(Greeting("hello"));
    let app = Router::new().route_service("/greet", routes);

    let response = app
        .oneshot(get_request("/greet", &[("hx-request", "true")]))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "hello");
}

fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
    get_request(uri, headers).into_parts().0
}

#[test]
fn test_extractors_without_layer() {
    use axum::extract::FromRequestParts;

    let mut parts = parts(
        "/search?q=a%20b",
        &[
            ("hx-request", "true"),
            ("hx-prompt", "caf%C3%A9"),
            ("hx-prompt-uri-autoencoded", "true"),
        ],
    );

    let htmx = tokio_test::block_on(HtmxRequest::from_request_parts(&mut parts, &())).unwrap();
    assert!(htmx.is_htmx_request);
    assert_eq!(htmx.prompt_response.as_deref(), Some("café"));

    let compiler =
        tokio_test::block_on(ResponseCompiler::from_request_parts(&mut parts, &())).unwrap();
    assert_eq!(compiler.current_url(), "/search?q=a%20b");
    assert_eq!(compiler.resolve_url("/x"), "/x");
}
