//! `version` command: build-time metadata.

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};

/// Build-time information collected by the `built` crate.
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Prints version and build information.
pub fn run(args: &VersionArgs) {
    match args.format {
        OutputFormat::Human => {
            println!("{} {}", built_info::PKG_NAME, built_info::PKG_VERSION);
            println!("rustc: {}", built_info::RUSTC_VERSION);
            println!("target: {}", built_info::TARGET);
            println!("profile: {}", built_info::PROFILE);
        }
        OutputFormat::Json => {
            let rendered = json!({
                "name": built_info::PKG_NAME,
                "version": built_info::PKG_VERSION,
                "rustc": built_info::RUSTC_VERSION,
                "target": built_info::TARGET,
                "profile": built_info::PROFILE,
            });
            println!("{rendered}");
        }
    }
}
