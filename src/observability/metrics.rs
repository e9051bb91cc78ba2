//! Metrics collection.
//!
//! Prometheus-compatible metrics with label cardinality protection:
//! cell kind labels come from parsed content, so unrecognized kinds are
//! bucketed as `"__unknown__"` rather than minted as fresh labels.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::content::document::{CellKind, Document};
use crate::error::CellbookError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Sanitizes a cell kind for use as a metrics label.
#[must_use]
pub fn sanitize_kind_label(kind: &CellKind) -> &str {
    if matches!(kind, CellKind::Unknown(_)) {
        "__unknown__"
    } else {
        kind.as_str()
    }
}

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without
/// an HTTP endpoint.
///
/// # Errors
///
/// Returns `CellbookError::Io` if the recorder or HTTP listener cannot
/// be installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), CellbookError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| CellbookError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!("cellbook_loads_total", "Documents loaded, by source kind");
    describe_counter!("cellbook_cells_total", "Cells parsed, by cell kind");
    describe_counter!(
        "cellbook_fetch_errors_total",
        "Failed content loads, by source kind"
    );
    describe_counter!("cellbook_runs_total", "Completed simulated runs");
    describe_counter!(
        "cellbook_runs_rejected_total",
        "Run activations ignored while a run was already pending"
    );
    describe_histogram!(
        "cellbook_run_duration_ms",
        "Simulated execution delay in milliseconds"
    );
}

/// Records a successful document load.
pub fn record_load(source: &'static str, doc: &Document) {
    counter!("cellbook_loads_total", "source" => source).increment(1);
    for cell in &doc.cells {
        let kind = sanitize_kind_label(&cell.kind).to_owned();
        counter!("cellbook_cells_total", "kind" => kind).increment(1);
    }
}

/// Records a failed content load.
pub fn record_fetch_error(source: &'static str) {
    counter!("cellbook_fetch_errors_total", "source" => source).increment(1);
}

/// Records a completed simulated run.
pub fn record_run_completed(delay: Duration) {
    counter!("cellbook_runs_total").increment(1);
    histogram!("cellbook_run_duration_ms").record(delay.as_secs_f64() * 1000.0);
}

/// Records a run activation ignored by the busy guard.
pub fn record_run_rejected() {
    counter!("cellbook_runs_rejected_total").increment(1);
}
