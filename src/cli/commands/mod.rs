//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod render;
pub mod run;
pub mod serve;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::CellbookError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli) -> Result<(), CellbookError> {
    match cli.command {
        Commands::Render(args) => render::run(&args).await,
        Commands::Validate(args) => validate::run(&args),
        Commands::Serve(args) => serve::run(&args).await,
        Commands::Run(args) => run::run(&args).await,
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
