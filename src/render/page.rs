//! Full-page HTML shell around a rendered document.
//!
//! Styling is the host page's concern; the shell only provides the
//! named targets the runtime mutates (header titles, status text, and
//! the notebook container).

use crate::content::document::Document;
use crate::render::cell::document_body;
use crate::render::escape::escape_html;

/// Target id of the notebook container.
pub const CONTAINER_ID: &str = "notebook-container";

/// Target id of the kernel status line.
pub const STATUS_TEXT_ID: &str = "status-text";

/// Target id of the page header title.
pub const HEADER_TITLE_ID: &str = "header-title";

/// Target id of the page header subtitle.
pub const HEADER_SUBTITLE_ID: &str = "header-subtitle";

/// Renders a complete HTML page for the document.
#[must_use]
pub fn render_page(doc: &Document) -> String {
    let title = escape_html(doc.title().unwrap_or("Interactive Notebook"));
    let subtitle = escape_html(doc.subtitle().unwrap_or_default());
    let body = document_body(doc);
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title id=\"notebook-title\">{title}</title></head>\n",
            "<body>\n",
            "<header>",
            "<h1 id=\"{header_title}\">{title}</h1>",
            "<p id=\"{header_subtitle}\">{subtitle}</p>",
            "<span id=\"{status}\">Kernel Ready</span>",
            "</header>\n",
            "<main id=\"{container}\">{body}</main>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = title,
        header_title = HEADER_TITLE_ID,
        header_subtitle = HEADER_SUBTITLE_ID,
        status = STATUS_TEXT_ID,
        container = CONTAINER_ID,
        subtitle = subtitle,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parser;

    #[test]
    fn test_page_uses_metadata_title() {
        let doc = parser::parse("---\ntitle: My Lesson\nsubtitle: Part 1\n---\n## [Markdown]\nhi");
        let page = render_page(&doc);
        assert!(page.contains("<title id=\"notebook-title\">My Lesson</title>"));
        assert!(page.contains(">Part 1</p>"));
        assert!(page.contains("Kernel Ready"));
        assert!(page.contains("id=\"notebook-container\""));
    }

    #[test]
    fn test_page_fallback_title() {
        let doc = parser::parse("## [Markdown]\nhi");
        assert!(render_page(&doc).contains("Interactive Notebook"));
    }

    #[test]
    fn test_title_escaped() {
        let doc = parser::parse("---\ntitle: <evil>\n---\n");
        let page = render_page(&doc);
        assert!(page.contains("&lt;evil&gt;"));
        assert!(!page.contains("<evil>"));
    }
}
