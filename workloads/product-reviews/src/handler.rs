//! Spin HTTP entry point.

use serde_json::json;
use spin_sdk::http::{Method, Request, Response};
use spin_sdk::http_component;
use tracing_subscriber::EnvFilter;

use turbo_reviews::config::ATTR_PRODUCT_URL;
use turbo_reviews::form::FormStatus;
use turbo_reviews::http::SpinTransport;
use turbo_reviews::prelude::*;
use turbo_reviews::storage::SpinStore;

use crate::params::{parse_query, storage_key, SubmitRequest, ViewParams, VoteRequest};

/// Main HTTP handler for the reviews widget.
#[http_component]
async fn handle_reviews(req: Request) -> anyhow::Result<Response> {
    init_tracing();

    let path = req.path().trim_end_matches('/').to_string();
    tracing::info!(method = ?req.method(), path = %path, "Reviews request");

    match (req.method(), path.as_str()) {
        (Method::Get, "/reviews") => render_reviews(&req).await,
        (Method::Post, "/reviews/vote") => vote(&req).await,
        (Method::Post, "/reviews/submit") => submit(&req).await,
        _ => Ok(Response::builder()
            .status(404)
            .header("content-type", "text/plain")
            .body("Not found")
            .build()),
    }
}

async fn render_reviews(req: &Request) -> anyhow::Result<Response> {
    let query = parse_query(req.query());
    let view = ViewParams::from_query(&query);
    let page_url = query
        .get(ATTR_PRODUCT_URL)
        .cloned()
        .or_else(|| header(req, "referer"))
        .unwrap_or_default();

    let mut widget = widget(
        WidgetConfig::from_attributes(&query, &page_url),
        query.get("visitor").map(String::as_str),
    );
    widget.restore_view(view.sort, view.star, view.page);
    widget.run(&api(), Action::Load).await;
    tracing::info!(
        product_id = %widget.config().product_id,
        page = widget.state().current_page(),
        reviews = widget.state().reviews().len(),
        "Reviews rendered"
    );

    Ok(Response::builder()
        .status(200)
        .header("content-type", "text/html; charset=utf-8")
        .header("cache-control", "private, no-store")
        .body(widget.render())
        .build())
}

async fn vote(req: &Request) -> anyhow::Result<Response> {
    let body: VoteRequest = match serde_json::from_slice(req.body()) {
        Ok(body) => body,
        Err(e) => return Ok(json_response(400, json!({ "error": e.to_string() }))),
    };

    let config = match body.config() {
        Ok(config) => config,
        Err(e) => return Ok(json_response(400, json!({ "error": e.to_string() }))),
    };
    let mut widget = widget(config, body.visitor.as_deref());
    let effects = widget
        .run(
            &api(),
            Action::Vote {
                review_id: body.review_id.clone(),
                direction: body.direction,
            },
        )
        .await;

    if effects.is_empty() {
        Ok(json_response(409, json!({ "status": "already-voted" })))
    } else {
        Ok(json_response(202, json!({ "status": "recorded" })))
    }
}

async fn submit(req: &Request) -> anyhow::Result<Response> {
    let body: SubmitRequest = match serde_json::from_slice(req.body()) {
        Ok(body) => body,
        Err(e) => return Ok(json_response(400, json!({ "error": e.to_string() }))),
    };

    let page_url = header(req, "referer").unwrap_or_default();
    let mut widget = ReviewsWidget::new(
        WidgetConfig::from_attributes(&body.attributes, &page_url),
        Box::new(MemoryStore::new()),
    );
    if let Err(e) = widget.config().identifiers() {
        return Ok(json_response(400, json!({ "error": e.to_string() })));
    }

    let api = api();
    for action in body.actions() {
        widget.run(&api, action).await;
    }

    let form = widget.state().form();
    let response = match form.status() {
        FormStatus::Submitted => json_response(201, json!({ "status": "submitted" })),
        FormStatus::Failed(message) => json_response(502, json!({ "error": message })),
        _ => json_response(
            422,
            json!({ "error": form.validation().unwrap_or("Invalid review") }),
        ),
    };
    Ok(response)
}

fn widget(config: WidgetConfig, visitor: Option<&str>) -> ReviewsWidget {
    let store: Box<dyn KeyValueStore> = match SpinStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "Key-Value store unavailable; votes are not persisted");
            Box::new(MemoryStore::new())
        }
    };
    ReviewsWidget::with_storage_key(config, store, storage_key(visitor))
}

fn api() -> HttpReviewsApi<SpinTransport> {
    HttpReviewsApi::new(SpinTransport, ApiEndpoints::default())
}

fn header(req: &Request, name: &str) -> Option<String> {
    req.header(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn json_response(status: u16, body: serde_json::Value) -> Response {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.to_string())
        .build()
}

fn init_tracing() {
    // Already set on warm instances.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("product_reviews=info,turbo_reviews=info"))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
