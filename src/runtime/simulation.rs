//! Notebook session: content loading and run simulation.
//!
//! A [`NotebookSession`] owns all mutable pipeline state (the completed
//! run counter, the in-flight guard, the cancellation token) so nothing
//! lives in ambient globals. Runs are cooperative timer tasks: several
//! cells may be in flight at once, each mutating disjoint surface
//! targets, and a busy guard makes reactivation while pending a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};
use uuid::Uuid;

use crate::content::document::{CellKind, Document};
use crate::content::fetch::{ContentFetcher, ContentSource};
use crate::content::parser;
use crate::error::FetchError;
use crate::observability::metrics;
use crate::render::cell::{cell_dom_id, document_body};
use crate::render::escape::escape_html;
use crate::render::page::{HEADER_SUBTITLE_ID, HEADER_TITLE_ID, STATUS_TEXT_ID};
use crate::render::reflection::widget_id;
use crate::runtime::events::{EventKind, SubscriptionTable};
use crate::runtime::surface::Surface;

/// Loading placeholder shown while a fetch is in flight.
const LOADING_HTML: &str = "<div class=\"loading\">Loading notebook content...</div>";

/// Run control label in its idle state.
const RUN_LABEL: &str = "<span>\u{25b6}</span> Run";

/// Run control label while a simulated run is pending.
const RUNNING_LABEL: &str = "<span class=\"loading-spinner\"></span> Running...";

// ============================================================================
// RunWindow
// ============================================================================

/// Delay configuration for simulated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    /// Lower bound of the uniformly sampled execution delay.
    pub min_delay: Duration,
    /// Upper bound of the uniformly sampled execution delay.
    pub max_delay: Duration,
    /// Fixed delay between output reveal and reflection reveal.
    pub reflection_delay: Duration,
}

impl Default for RunWindow {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(3000),
            reflection_delay: Duration::from_millis(500),
        }
    }
}

impl RunWindow {
    /// Samples an execution delay uniformly from the window.
    ///
    /// A window with `max_delay <= min_delay` always yields `min_delay`.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let min = u64::try_from(self.min_delay.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

// ============================================================================
// RunOutcome
// ============================================================================

/// Result of activating a cell's run control.
#[derive(Debug)]
pub enum RunOutcome {
    /// A simulated run was started; the handle resolves when the full
    /// reveal sequence (output, then reflection) has finished.
    Started(JoinHandle<()>),
    /// A run for this cell is already pending; nothing was started.
    AlreadyRunning,
    /// The cell's run control is not present on the surface.
    MissingTarget,
}

impl RunOutcome {
    /// Whether a new run was started.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

// ============================================================================
// NotebookSession
// ============================================================================

/// Owned state for one notebook instance.
pub struct NotebookSession {
    surface: Arc<dyn Surface>,
    window: RunWindow,
    runs_completed: AtomicU64,
    in_flight: DashMap<String, ()>,
    cancel: CancellationToken,
}

impl NotebookSession {
    /// Creates a session against the given surface.
    #[must_use]
    pub fn new(surface: Arc<dyn Surface>, window: RunWindow) -> Self {
        Self {
            surface,
            window,
            runs_completed: AtomicU64::new(0),
            in_flight: DashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Number of completed simulated runs.
    #[must_use]
    pub fn runs_completed(&self) -> u64 {
        self.runs_completed.load(Ordering::SeqCst)
    }

    /// Cancels every pending reveal timer.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Fetches, parses, and renders content into the container target.
    ///
    /// A loading placeholder is shown during the fetch and replaced by
    /// either the rendered cells or a single error message; on failure
    /// the pipeline halts for this load attempt (no retry).
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] after surfacing it in the container.
    pub async fn load(
        &self,
        fetcher: &dyn ContentFetcher,
        source: &ContentSource,
        container: &str,
    ) -> Result<Document, FetchError> {
        self.surface.set_html(container, LOADING_HTML);

        let raw = match fetcher.fetch(source).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%source, error = %e, "content load failed");
                metrics::record_fetch_error(source.kind_label());
                self.surface.set_html(
                    container,
                    &format!(
                        "<div class=\"error\">Error loading notebook content: {}</div>",
                        escape_html(&e.to_string())
                    ),
                );
                return Err(e);
            }
        };

        let doc = parser::parse(&raw);
        info!(%source, cells = doc.cells.len(), "content loaded");
        metrics::record_load(source.kind_label(), &doc);

        if let Some(title) = doc.title() {
            self.surface.set_text(HEADER_TITLE_ID, title);
            self.surface.set_text("notebook-title", title);
        }
        if let Some(subtitle) = doc.subtitle() {
            self.surface.set_text(HEADER_SUBTITLE_ID, subtitle);
        }

        self.surface.set_html(container, &document_body(&doc));
        Ok(doc)
    }

    /// Activates the run control of the cell with the given ordinal.
    ///
    /// The control enters a busy, disabled state; after a randomized
    /// delay the pre-computed output is revealed, the control resets,
    /// and the counter increments. A fixed delay later the reflection
    /// widget (if any) is revealed. Reactivation while pending is a
    /// no-op, as is a reveal whose targets were removed meanwhile.
    pub fn run_cell(self: &Arc<Self>, ordinal: usize) -> RunOutcome {
        let cell_id = cell_dom_id(ordinal);
        let run_id = format!("{cell_id}-run");

        if !self.surface.exists(&run_id) {
            debug!(%cell_id, "run control missing; ignoring activation");
            return RunOutcome::MissingTarget;
        }
        if self.in_flight.insert(cell_id.clone(), ()).is_some() {
            debug!(%cell_id, "run already pending; ignoring activation");
            metrics::record_run_rejected();
            return RunOutcome::AlreadyRunning;
        }

        self.surface.set_html(&run_id, RUNNING_LABEL);
        self.surface.add_class(&run_id, "running");
        self.surface.set_disabled(&run_id, true);

        let delay = self.window.sample();
        let session = Arc::clone(self);
        let run_span = tracing::info_span!("run", %cell_id, run_id = %Uuid::new_v4());
        let handle = tokio::spawn(
            async move {
                session.simulate(&cell_id, delay).await;
            }
            .instrument(run_span),
        );

        RunOutcome::Started(handle)
    }

    /// Timer-driven reveal sequence for one cell.
    async fn simulate(&self, cell_id: &str, delay: Duration) {
        let run_id = format!("{cell_id}-run");
        let output_id = format!("{cell_id}-output");
        let reflection_id = widget_id(cell_id);

        tokio::select! {
            () = self.cancel.cancelled() => {
                self.in_flight.remove(cell_id);
                return;
            }
            () = tokio::time::sleep(delay) => {}
        }

        // The page may have been torn down while the timer was pending.
        if !self.surface.exists(&output_id) {
            debug!(%cell_id, "output target removed before reveal");
            self.in_flight.remove(cell_id);
            return;
        }

        self.surface.add_class(&output_id, "show");
        self.surface.set_html(&run_id, RUN_LABEL);
        self.surface.remove_class(&run_id, "running");
        self.surface.set_disabled(&run_id, false);

        let count = self.runs_completed.fetch_add(1, Ordering::SeqCst) + 1;
        self.update_status(count);
        metrics::record_run_completed(delay);
        info!(%cell_id, count, ?delay, "run completed");

        self.in_flight.remove(cell_id);

        tokio::select! {
            () = self.cancel.cancelled() => return,
            () = tokio::time::sleep(self.window.reflection_delay) => {}
        }

        if self.surface.exists(&reflection_id) {
            self.surface.add_class(&reflection_id, "show");
        }
    }

    /// Builds the subscription table wiring a document's run controls
    /// to this session.
    ///
    /// One `Click` subscription per code cell, keyed by the run
    /// control's id; the table is built once after a load and events on
    /// anything else stay no-ops.
    #[must_use]
    pub fn subscriptions(self: &Arc<Self>, doc: &Document) -> SubscriptionTable {
        let mut table = SubscriptionTable::new();
        for (index, cell) in doc.cells.iter().enumerate() {
            if cell.kind != CellKind::Code {
                continue;
            }
            let ordinal = index + 1;
            let session = Arc::clone(self);
            let target = format!("{}-run", cell_dom_id(ordinal));
            table.subscribe(EventKind::Click, &target, move |_| {
                let _ = session.run_cell(ordinal);
            });
        }
        table
    }

    /// Reflects the completed-run counter into the status display.
    fn update_status(&self, count: u64) {
        if !self.surface.exists(STATUS_TEXT_ID) {
            return;
        }
        if count > 0 {
            self.surface
                .set_text(STATUS_TEXT_ID, &format!("Cells Run: {count}"));
        } else {
            self.surface.set_text(STATUS_TEXT_ID, "Kernel Ready");
        }
    }
}

impl std::fmt::Debug for NotebookSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotebookSession")
            .field("runs_completed", &self.runs_completed())
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}
