//! Minimal markdown-to-HTML transform for markdown-typed cell content.
//!
//! Supports exactly: `#`/`##`/`###` headings, bold, italic, unordered
//! list items, and newline-to-break conversion, applied in that fixed
//! order. List wrapping runs once per invocation and wraps the single
//! span from the first `<li>` to the last `</li>`; multiple separated
//! lists in one cell are NOT wrapped individually. That limitation is
//! part of the transform's contract and is preserved deliberately.

use std::sync::LazyLock;

use regex::Regex;

static H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static LIST_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)(<li>.*</li>)").unwrap());

/// Applies the minimal markdown transform.
#[must_use]
pub fn to_html(text: &str) -> String {
    let out = H3.replace_all(text, "<h3>$1</h3>");
    let out = H2.replace_all(&out, "<h2>$1</h2>");
    let out = H1.replace_all(&out, "<h1>$1</h1>");
    let out = BOLD.replace_all(&out, "<strong>$1</strong>");
    let out = ITALIC.replace_all(&out, "<em>$1</em>");
    let out = LIST_ITEM.replace_all(&out, "<li>$1</li>");
    // Single wrap: only the first (greedy) run of list items gets a <ul>.
    let out = LIST_RUN.replace(&out, "<ul>$1</ul>");
    out.replace('\n', "<br>")
}
