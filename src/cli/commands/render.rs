//! `render` command: fetch, parse, and emit HTML.

use tracing::info;

use crate::cli::args::RenderArgs;
use crate::content::fetch::{ContentFetcher, ContentSource, Fetcher};
use crate::content::parser;
use crate::error::CellbookError;
use crate::render;

/// Runs the render command.
///
/// # Errors
///
/// Returns an error when the fetch fails or the output file cannot be
/// written.
pub async fn run(args: &RenderArgs) -> Result<(), CellbookError> {
    let source = ContentSource::parse(&args.content);
    let fetcher = Fetcher::new();
    let raw = fetcher.fetch(&source).await?;
    let doc = parser::parse(&raw);

    let html = if args.full_page {
        render::render_page(&doc)
    } else {
        render::document_body(&doc)
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, &html)?;
            info!(out = %path.display(), cells = doc.cells.len(), "rendered");
        }
        None => println!("{html}"),
    }

    Ok(())
}
