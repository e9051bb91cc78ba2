//! Code/output splitter for code cell bodies.
//!
//! Scans for the literal `**Output:**` marker to switch from code to
//! output accumulation; a literal `**Reflection:**` marker stops the
//! scan entirely. Triple-backtick fence lines toggle fence state and
//! are themselves excluded from both halves.

/// The code/output halves of a code cell body, derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeCellBody {
    /// Code text with fence lines stripped, trimmed.
    pub code: String,
    /// Pre-computed output text with fence lines stripped, trimmed.
    pub output: String,
}

/// Splits code cell content lines into code and output.
#[must_use]
pub fn split(lines: &[String]) -> CodeCellBody {
    let mut code = String::new();
    let mut output = String::new();
    let mut in_output = false;
    let mut in_fence = false;

    for line in lines {
        let trimmed = line.trim();

        if trimmed == "**Output:**" {
            in_output = true;
            continue;
        }
        if trimmed == "**Reflection:**" {
            break;
        }
        if line.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }

        let target = if in_output { &mut output } else { &mut code };
        target.push_str(line);
        target.push('\n');
    }

    CodeCellBody {
        code: code.trim().to_string(),
        output: output.trim().to_string(),
    }
}
