//! Per-kind cell templates.
//!
//! `render_cell` is a pure function of the cell and its ordinal: no
//! counters, no surface access, identical output for identical input.

use crate::content::document::{Cell, CellKind, Document};
use crate::content::split;
use crate::render::escape::escape_html;
use crate::render::markdown;
use crate::render::reflection::render_reflection;

/// DOM id of a rendered cell, derived from its 1-based ordinal.
#[must_use]
pub fn cell_dom_id(ordinal: usize) -> String {
    format!("cell-{ordinal}")
}

/// Renders one cell to an HTML fragment.
///
/// Dispatches on the cell kind; unknown kinds render to an empty cell
/// shell so ordinals stay aligned with the parsed document.
#[must_use]
pub fn render_cell(cell: &Cell, ordinal: usize) -> String {
    match &cell.kind {
        CellKind::Markdown => render_markdown_cell(cell, ordinal, None),
        CellKind::GradientHeader => render_markdown_cell(cell, ordinal, Some("gradient-header")),
        CellKind::Insight => render_markdown_cell(cell, ordinal, Some("insight-box")),
        CellKind::Quote => render_markdown_cell(cell, ordinal, Some("quote-box")),
        CellKind::StepNavigation => render_wrapped(
            ordinal,
            "markdown-cell",
            "Markdown",
            &render_step_navigation(&cell.content),
        ),
        CellKind::Code => render_code_cell(cell, ordinal),
        CellKind::Unknown(_) => format!("<div class=\"cell\" id=\"{}\"></div>", cell_dom_id(ordinal)),
    }
}

/// Renders every cell of a document, in order, with 1-based ordinals.
#[must_use]
pub fn document_body(doc: &Document) -> String {
    doc.cells
        .iter()
        .enumerate()
        .map(|(index, cell)| render_cell(cell, index + 1))
        .collect()
}

/// Shared cell shell: header badge plus content area.
fn render_wrapped(ordinal: usize, extra_class: &str, badge: &str, content: &str) -> String {
    let id = cell_dom_id(ordinal);
    let badge_class = badge.to_lowercase();
    format!(
        concat!(
            "<div class=\"cell {extra_class}\" id=\"{id}\">",
            "<div class=\"cell-header\">",
            "<span class=\"cell-type {badge_class}\">{badge}</span>",
            "<span>In [{ordinal}]:</span>",
            "</div>",
            "<div class=\"cell-content\">{content}</div>",
            "</div>"
        ),
        extra_class = extra_class,
        id = id,
        badge_class = badge_class,
        badge = badge,
        ordinal = ordinal,
        content = content,
    )
}

/// Markdown-family cells; `boxed` selects the optional callout wrapper.
fn render_markdown_cell(cell: &Cell, ordinal: usize, boxed: Option<&str>) -> String {
    let html = markdown::to_html(&cell.body());
    let content = boxed.map_or(html.clone(), |class| {
        format!("<div class=\"{class}\">{html}</div>")
    });
    render_wrapped(ordinal, "markdown-cell", "Markdown", &content)
}

/// Lines starting with `- ` become step buttons; a `(completed)` suffix
/// marks the step done and is stripped from the label.
fn render_step_navigation(content: &[String]) -> String {
    let mut html = String::new();
    for line in content {
        let trimmed = line.trim();
        if let Some(step) = trimmed.strip_prefix("- ") {
            let completed = step.contains("(completed)");
            let label = step.replace(" (completed)", "");
            let class = if completed {
                "step-button completed"
            } else {
                "step-button"
            };
            html.push_str(&format!(
                "<div class=\"{class}\">{}</div>",
                escape_html(&label)
            ));
        }
    }
    html
}

/// Code cells: escaped code, a run control, the hidden pre-computed
/// output, and (when present) a hidden reflection widget.
fn render_code_cell(cell: &Cell, ordinal: usize) -> String {
    let id = cell_dom_id(ordinal);
    let body = split::split(&cell.content);

    let code = escape_html(&body.code);
    let output = escape_html(&body.output);
    let mut content = format!(
        concat!(
            "<div class=\"code-input\">{code}</div>",
            "<button class=\"run-button\" id=\"{id}-run\"><span>\u{25b6}</span> Run</button>",
            "<div class=\"cell-output\" id=\"{id}-output\">{output}</div>"
        ),
        code = code,
        id = id,
        output = output,
    );

    if let Some(spec) = &cell.reflection {
        content.push_str(&render_reflection(spec, &id));
    }

    render_wrapped(ordinal, "code-cell", "Code", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::{Choice, ReflectionSpec};

    fn cell(kind: CellKind, lines: &[&str]) -> Cell {
        let mut c = Cell::new(kind);
        c.content = lines.iter().map(ToString::to_string).collect();
        c
    }

    #[test]
    fn test_render_is_pure_and_idempotent() {
        let c = cell(CellKind::Markdown, &["# Hello", "world"]);
        assert_eq!(render_cell(&c, 3), render_cell(&c, 3));
    }

    #[test]
    fn test_markdown_cell_structure() {
        let html = render_cell(&cell(CellKind::Markdown, &["**hi**"]), 1);
        assert!(html.contains("markdown-cell"));
        assert!(html.contains("In [1]:"));
        assert!(html.contains("<strong>hi</strong>"));
    }

    #[test]
    fn test_boxed_kinds_get_wrappers() {
        let gradient = render_cell(&cell(CellKind::GradientHeader, &["# T"]), 1);
        assert!(gradient.contains("gradient-header"));
        let insight = render_cell(&cell(CellKind::Insight, &["note"]), 1);
        assert!(insight.contains("insight-box"));
        let quote = render_cell(&cell(CellKind::Quote, &["words"]), 1);
        assert!(quote.contains("quote-box"));
    }

    #[test]
    fn test_boxed_kinds_present_as_markdown() {
        let html = render_cell(&cell(CellKind::Insight, &["note"]), 2);
        assert!(html.contains(">Markdown</span>"));
    }

    #[test]
    fn test_step_navigation() {
        let html = render_cell(
            &cell(
                CellKind::StepNavigation,
                &["- Prepare data (completed)", "- Train model", "not a step"],
            ),
            1,
        );
        assert!(html.contains("step-button completed"));
        assert!(html.contains("Prepare data"));
        assert!(!html.contains("(completed)"));
        assert!(html.contains("Train model"));
        assert!(!html.contains("not a step"));
    }

    #[test]
    fn test_code_cell_escapes_code_and_output() {
        let html = render_cell(
            &cell(
                CellKind::Code,
                &["<b>bad</b>", "**Output:**", "1 < 2"],
            ),
            4,
        );
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(html.contains("1 &lt; 2"));
        assert!(!html.contains("<b>bad</b>"));
    }

    #[test]
    fn test_code_cell_ids() {
        let html = render_cell(&cell(CellKind::Code, &["x"]), 7);
        assert!(html.contains("id=\"cell-7-run\""));
        assert!(html.contains("id=\"cell-7-output\""));
    }

    #[test]
    fn test_code_cell_with_reflection_widget() {
        let mut c = cell(CellKind::Code, &["x"]);
        c.reflection = Some(ReflectionSpec::MultipleChoice {
            question: "Q?".to_string(),
            choices: vec![Choice {
                text: "A".to_string(),
                correct: true,
                feedback: "fb".to_string(),
            }],
        });
        let html = render_cell(&c, 2);
        assert!(html.contains("id=\"cell-2-reflection\""));
    }

    #[test]
    fn test_unknown_kind_renders_empty_shell() {
        let html = render_cell(&cell(CellKind::Unknown("diagram".to_string()), &["x"]), 5);
        assert_eq!(html, "<div class=\"cell\" id=\"cell-5\"></div>");
    }

    #[test]
    fn test_document_body_ordinals() {
        let doc = Document {
            metadata: indexmap::IndexMap::new(),
            cells: vec![
                cell(CellKind::Markdown, &["a"]),
                cell(CellKind::Code, &["b"]),
            ],
        };
        let html = document_body(&doc);
        assert!(html.contains("In [1]:"));
        assert!(html.contains("In [2]:"));
        assert!(html.contains("id=\"cell-2-run\""));
    }
}
