//! Logging and metrics for `cellbook`.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
