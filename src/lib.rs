//! `cellbook` — interactive teaching-notebook renderer and run simulator
//!
//! This library turns line-oriented lesson documents (front matter,
//! `## [TYPE]` cell headers, embedded reflection quizzes) into rendered
//! notebook markup and simulates "executing" code cells against a
//! pluggable page surface.

pub mod cli;
pub mod content;
pub mod error;
pub mod exercise;
pub mod observability;
pub mod render;
pub mod runtime;
