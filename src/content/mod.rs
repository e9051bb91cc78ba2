//! Notebook content pipeline: typed document model, line-oriented
//! parser, code/output splitter, and content fetcher.

pub mod document;
pub mod fetch;
pub mod parser;
pub mod split;

pub use document::{Cell, CellKind, Choice, Document, ReflectionSpec, TrueFalseFeedback};
pub use fetch::{ContentFetcher, ContentSource, Fetcher};
pub use parser::{ParseIssue, parse, parse_with_report};
pub use split::{CodeCellBody, split};
