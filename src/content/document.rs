//! Typed notebook document model.
//!
//! A [`Document`] is produced once per successful fetch+parse, is
//! immutable afterwards, and is replaced wholesale on re-fetch.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Document
// ============================================================================

/// A parsed notebook document: front-matter metadata plus an ordered
/// sequence of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Front-matter key/value pairs in source order.
    pub metadata: IndexMap<String, String>,
    /// Cells in source order.
    pub cells: Vec<Cell>,
}

impl Document {
    /// Returns the document title from front matter, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").map(String::as_str)
    }

    /// Returns the document subtitle from front matter, if present.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.metadata.get("subtitle").map(String::as_str)
    }
}

// ============================================================================
// Cell
// ============================================================================

/// One discrete unit of notebook content.
///
/// `content` holds raw body lines, excluding the `## [TYPE]` header and
/// any consumed reflection JSON block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// The cell kind parsed from the header.
    pub kind: CellKind,
    /// Raw body lines, verbatim (blank lines included).
    pub content: Vec<String>,
    /// Inline quiz attached to this cell (code cells only).
    pub reflection: Option<ReflectionSpec>,
}

impl Cell {
    /// Creates an empty cell of the given kind.
    #[must_use]
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            content: Vec::new(),
            reflection: None,
        }
    }

    /// Returns the cell body joined back into a single string.
    #[must_use]
    pub fn body(&self) -> String {
        self.content.join("\n")
    }
}

// ============================================================================
// CellKind
// ============================================================================

/// Closed set of cell kinds recognized by the renderer.
///
/// Headers with an unrecognized name are carried as [`CellKind::Unknown`]
/// so the cell count always matches the header count; such cells render
/// to an empty fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Plain markdown content.
    Markdown,
    /// Code with embedded pre-computed output.
    Code,
    /// Markdown wrapped in a gradient header box.
    GradientHeader,
    /// A list of lesson steps rendered as navigation buttons.
    StepNavigation,
    /// Markdown wrapped in an insight callout box.
    Insight,
    /// Markdown wrapped in a quote box.
    Quote,
    /// Unrecognized kind, preserving the lower-cased header name.
    Unknown(String),
}

impl CellKind {
    /// The recognized kind names as they appear (lower-cased) in headers.
    pub const KNOWN: [&'static str; 6] = [
        "markdown",
        "code",
        "gradient_header",
        "step_navigation",
        "insight",
        "quote",
    ];

    /// Parses a lower-cased header name into a kind.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "markdown" => Self::Markdown,
            "code" => Self::Code,
            "gradient_header" => Self::GradientHeader,
            "step_navigation" => Self::StepNavigation,
            "insight" => Self::Insight,
            "quote" => Self::Quote,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the lower-cased name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Markdown => "markdown",
            Self::Code => "code",
            Self::GradientHeader => "gradient_header",
            Self::StepNavigation => "step_navigation",
            Self::Insight => "insight",
            Self::Quote => "quote",
            Self::Unknown(name) => name,
        }
    }

    /// Display label shown in the cell header badge.
    ///
    /// Every kind except `code` presents as markdown.
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        match self {
            Self::Code => "Code",
            _ => "Markdown",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ReflectionSpec
// ============================================================================

/// Inline quiz question attached to a code cell.
///
/// Exactly one choice (or boolean branch) is the correct answer; the
/// renderer must never reveal which before a selection is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReflectionSpec {
    /// Multiple-choice question with per-choice feedback.
    #[serde(rename = "multiple-choice")]
    MultipleChoice {
        /// Question text.
        question: String,
        /// Ordered answer choices.
        choices: Vec<Choice>,
    },

    /// True/false question with a two-branch feedback pair.
    #[serde(rename = "true-false")]
    TrueFalse {
        /// Question text.
        question: String,
        /// Whether "True" is the correct answer.
        correct: bool,
        /// Feedback pair indexed by whether the chosen option is the
        /// true answer.
        feedback: TrueFalseFeedback,
    },
}

/// One answer choice of a multiple-choice reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice text.
    pub text: String,
    /// Whether this choice is the correct answer.
    pub correct: bool,
    /// Feedback shown when this choice is selected.
    pub feedback: String,
}

/// Feedback pair for a true/false reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrueFalseFeedback {
    /// Shown when the selected option is the true answer.
    pub correct: String,
    /// Shown when the selected option is not the true answer.
    pub incorrect: String,
}

impl ReflectionSpec {
    /// Returns the question text.
    #[must_use]
    pub fn question(&self) -> &str {
        match self {
            Self::MultipleChoice { question, .. } | Self::TrueFalse { question, .. } => question,
        }
    }

    /// Number of selectable options (2 for true/false).
    #[must_use]
    pub fn option_count(&self) -> usize {
        match self {
            Self::MultipleChoice { choices, .. } => choices.len(),
            Self::TrueFalse { .. } => 2,
        }
    }

    /// The boolean value an option index represents in the true/false
    /// variant: option 0 is "True", option 1 is "False".
    const fn option_bool(index: usize) -> bool {
        index == 0
    }

    /// Whether selecting the given option is correct.
    ///
    /// Returns `None` for an out-of-range index.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        match self {
            Self::MultipleChoice { choices, .. } => choices.get(index).map(|c| c.correct),
            Self::TrueFalse { correct, .. } => {
                (index < 2).then(|| Self::option_bool(index) == *correct)
            }
        }
    }

    /// The label shown for the given option.
    #[must_use]
    pub fn option_label(&self, index: usize) -> Option<&str> {
        match self {
            Self::MultipleChoice { choices, .. } => choices.get(index).map(|c| c.text.as_str()),
            Self::TrueFalse { .. } => match index {
                0 => Some("True"),
                1 => Some("False"),
                _ => None,
            },
        }
    }

    /// The feedback text bound to the given option.
    ///
    /// For true/false, the feedback is selected by whether the OPTION
    /// represents the true answer, not by the option's position: when
    /// `correct` is `false`, option 1 ("False") shows `feedback.correct`.
    #[must_use]
    pub fn feedback_for(&self, index: usize) -> Option<&str> {
        match self {
            Self::MultipleChoice { choices, .. } => choices.get(index).map(|c| c.feedback.as_str()),
            Self::TrueFalse {
                correct, feedback, ..
            } => (index < 2).then(|| {
                if Self::option_bool(index) == *correct {
                    feedback.correct.as_str()
                } else {
                    feedback.incorrect.as_str()
                }
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
