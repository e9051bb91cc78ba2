//! `serve` command: preview server for rendered notebook content.
//!
//! `GET /` fetches the configured source fresh, parses it, and returns
//! the rendered page, so the document is replaced wholesale on every
//! request. A fetch failure becomes a 502 with the same replacing
//! error body the in-page pipeline would show.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::args::ServeArgs;
use crate::content::fetch::{ContentFetcher, ContentSource, Fetcher};
use crate::content::parser;
use crate::error::CellbookError;
use crate::observability::metrics;
use crate::render::escape::escape_html;
use crate::render::page::render_page;

/// Shared state for the preview server.
#[derive(Clone)]
struct AppState {
    fetcher: Arc<Fetcher>,
    source: Arc<ContentSource>,
}

/// Builds the preview router; separated from [`run`] so tests can
/// drive it without binding a socket.
#[must_use]
pub fn router(source: ContentSource) -> Router {
    let state = AppState {
        fetcher: Arc::new(Fetcher::new()),
        source: Arc::new(source),
    };
    Router::new().route("/", get(index)).with_state(state)
}

/// Runs the serve command until interrupted.
///
/// # Errors
///
/// Returns an error when the listener cannot bind or metrics
/// initialization fails.
pub async fn run(args: &ServeArgs) -> Result<(), CellbookError> {
    metrics::init_metrics(args.metrics_port)?;

    let source = ContentSource::parse(&args.content);
    let app = router(source);

    let listener = TcpListener::bind(&args.http).await?;
    info!(addr = %args.http, content = %args.content, "preview server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

/// `GET /`: fetch, parse, render.
async fn index(State(state): State<AppState>) -> Response {
    match state.fetcher.fetch(&state.source).await {
        Ok(raw) => {
            let doc = parser::parse(&raw);
            metrics::record_load(state.source.kind_label(), &doc);
            html_response(StatusCode::OK, render_page(&doc))
        }
        Err(e) => {
            warn!(source = %state.source, error = %e, "preview fetch failed");
            metrics::record_fetch_error(state.source.kind_label());
            html_response(
                StatusCode::BAD_GATEWAY,
                format!(
                    "<div class=\"error\">Error loading notebook content: {}</div>",
                    escape_html(&e.to_string())
                ),
            )
        }
    }
}

fn html_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}
