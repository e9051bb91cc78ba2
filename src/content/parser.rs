//! Line-oriented notebook content parser.
//!
//! Single left-to-right pass with explicit states: front matter (only
//! when the document starts with `---`), cell scan on `## [TYPE]`
//! headers, reflection-block detection inside cells, and verbatim
//! content accumulation for everything else.
//!
//! Parsing never fails: malformed input degrades to fewer cells or
//! missing reflections, never to an error.

use tracing::{debug, warn};

use crate::content::document::{Cell, CellKind, Document, ReflectionSpec};

/// A non-fatal problem noticed while parsing.
///
/// The parser recovers from every issue; these are surfaced so the
/// `validate` subcommand can report them.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// 1-based source line where the issue was detected.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

/// Parses raw notebook text into a [`Document`], discarding issue
/// reports.
#[must_use]
pub fn parse(raw: &str) -> Document {
    parse_with_report(raw).0
}

/// Parses raw notebook text, also returning the non-fatal issues
/// encountered.
#[must_use]
pub fn parse_with_report(raw: &str) -> (Document, Vec<ParseIssue>) {
    let lines: Vec<&str> = raw.split('\n').collect();
    let mut doc = Document::default();
    let mut issues = Vec::new();
    let mut current: Option<Cell> = None;
    let mut in_front_matter = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        // Front matter delimiters are only recognized at the very top of
        // the document; a later `---` is ordinary content.
        if trimmed == "---" {
            if !in_front_matter && i == 0 {
                in_front_matter = true;
                i += 1;
                continue;
            }
            if in_front_matter {
                in_front_matter = false;
                i += 1;
                continue;
            }
        }

        if in_front_matter {
            // Split on the first colon only; colons inside values survive.
            if let Some((key, value)) = trimmed.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    doc.metadata
                        .insert(key.to_string(), strip_quotes(value.trim()).to_string());
                }
            }
            i += 1;
            continue;
        }

        if let Some(kind) = parse_header(trimmed) {
            if let Some(cell) = current.take() {
                doc.cells.push(cell);
            }
            current = Some(Cell::new(kind));
            i += 1;
            continue;
        }

        if let Some(cell) = current.as_mut() {
            // A ```json fence whose next line mentions "question" is a
            // reflection payload; consume it up to the closing fence.
            if trimmed.starts_with("```json")
                && lines.get(i + 1).is_some_and(|next| next.contains("\"question\""))
            {
                let fence_line = i + 1;
                let mut json = String::new();
                i += 1;
                while i < lines.len() && !lines[i].trim().starts_with("```") {
                    json.push_str(lines[i]);
                    json.push('\n');
                    i += 1;
                }

                match serde_json::from_str::<ReflectionSpec>(&json) {
                    Ok(spec) if cell.kind == CellKind::Code => cell.reflection = Some(spec),
                    Ok(_) => {
                        debug!(
                            line = fence_line,
                            kind = %cell.kind,
                            "reflection block in non-code cell ignored"
                        );
                        issues.push(ParseIssue {
                            line: fence_line,
                            message: format!(
                                "reflection block in '{}' cell is ignored (code cells only)",
                                cell.kind
                            ),
                        });
                    }
                    Err(e) => {
                        warn!(line = fence_line, error = %e, "failed to parse reflection JSON");
                        issues.push(ParseIssue {
                            line: fence_line,
                            message: format!("malformed reflection JSON: {e}"),
                        });
                    }
                }

                // Skip the closing fence (or stop at EOF).
                i += 1;
                continue;
            }

            cell.content.push(line.to_string());
        }

        i += 1;
    }

    if in_front_matter {
        issues.push(ParseIssue {
            line: 1,
            message: "front matter block is never closed".to_string(),
        });
    }

    if let Some(cell) = current.take() {
        doc.cells.push(cell);
    }

    (doc, issues)
}

/// Recognizes a `## [TYPE]` cell header and returns its kind.
fn parse_header(trimmed: &str) -> Option<CellKind> {
    let name = trimmed.strip_prefix("## [")?.strip_suffix(']')?;
    Some(CellKind::parse(&name.to_lowercase()))
}

/// Strips one pair of surrounding double quotes, if present.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
