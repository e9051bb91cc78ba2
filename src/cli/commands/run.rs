//! `run` command: load a document into an in-memory surface and
//! simulate executing every code cell.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::cli::args::RunArgs;
use crate::content::document::CellKind;
use crate::content::fetch::{ContentSource, Fetcher};
use crate::content::split;
use crate::error::CellbookError;
use crate::render::page::{CONTAINER_ID, STATUS_TEXT_ID};
use crate::runtime::simulation::{NotebookSession, RunOutcome, RunWindow};
use crate::runtime::surface::{MemorySurface, Surface};

/// Runs the run command.
///
/// # Errors
///
/// Returns an error when the content cannot be fetched.
pub async fn run(args: &RunArgs) -> Result<(), CellbookError> {
    let source = ContentSource::parse(&args.content);
    let fetcher = Fetcher::new();

    let surface = Arc::new(MemorySurface::new());
    surface.register(CONTAINER_ID);
    surface.register(STATUS_TEXT_ID);

    let window = RunWindow {
        min_delay: args.min_delay,
        max_delay: args.max_delay,
        reflection_delay: args.reflection_delay,
    };
    let session = Arc::new(NotebookSession::new(
        Arc::clone(&surface) as Arc<dyn Surface>,
        window,
    ));

    let started_at = Utc::now();
    let doc = session.load(&fetcher, &source, CONTAINER_ID).await?;

    let mut handles = Vec::new();
    for (index, cell) in doc.cells.iter().enumerate() {
        if cell.kind != CellKind::Code {
            continue;
        }
        let ordinal = index + 1;
        if let RunOutcome::Started(handle) = session.run_cell(ordinal) {
            let body = split::split(&cell.content);
            handles.push((ordinal, body, handle));
        }
    }

    if handles.is_empty() {
        println!("no code cells to run");
        return Ok(());
    }

    for (ordinal, body, handle) in handles {
        handle
            .await
            .map_err(|e| CellbookError::Io(std::io::Error::other(e.to_string())))?;
        println!("In [{ordinal}]:");
        if !body.output.is_empty() {
            for line in body.output.lines() {
                println!("  {line}");
            }
        }
    }

    let elapsed = Utc::now() - started_at;
    let status = surface
        .node(STATUS_TEXT_ID)
        .map(|n| n.text)
        .unwrap_or_default();
    info!(runs = session.runs_completed(), ?elapsed, "simulation finished");
    println!("{status}");

    Ok(())
}
