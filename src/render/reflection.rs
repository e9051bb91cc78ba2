//! Reflection quiz widget markup.
//!
//! The rendered widget embeds every option's feedback text in hidden
//! blocks and carries no markup hint of which option is correct; the
//! quiz controller reveals feedback only after a selection.

use crate::content::document::ReflectionSpec;
use crate::render::escape::escape_html;

/// DOM id of the reflection widget attached to a cell.
#[must_use]
pub fn widget_id(cell_id: &str) -> String {
    format!("{cell_id}-reflection")
}

/// DOM id of one selectable option.
#[must_use]
pub fn option_id(widget: &str, index: usize) -> String {
    format!("{widget}-choice-{index}")
}

/// DOM id of the feedback block bound to one option.
#[must_use]
pub fn feedback_id(widget: &str, index: usize) -> String {
    format!("{widget}-feedback-{index}")
}

/// DOM id of the radio input inside one option.
#[must_use]
pub fn radio_id(widget: &str, index: usize) -> String {
    format!("{widget}-radio-{index}")
}

/// Renders a reflection widget (hidden until the cell's run completes).
#[must_use]
pub fn render_reflection(spec: &ReflectionSpec, cell_id: &str) -> String {
    let widget = widget_id(cell_id);
    let question = escape_html(spec.question());

    let mut choices = String::new();
    for index in 0..spec.option_count() {
        let option = option_id(&widget, index);
        let feedback = feedback_id(&widget, index);
        let radio = radio_id(&widget, index);
        let label = escape_html(spec.option_label(index).unwrap_or_default());
        let feedback_text = escape_html(spec.feedback_for(index).unwrap_or_default());
        choices.push_str(&format!(
            concat!(
                "<div class=\"choice-option\" id=\"{option}\">",
                "<input type=\"radio\" name=\"{widget}\" id=\"{radio}\" ",
                "class=\"choice-radio\" value=\"{index}\">",
                "<div class=\"choice-text\">{label}</div>",
                "</div>",
                "<div class=\"choice-feedback\" id=\"{feedback}\">{feedback_text}</div>"
            ),
            option = option,
            widget = widget,
            radio = radio,
            index = index,
            label = label,
            feedback = feedback,
            feedback_text = feedback_text,
        ));
    }

    format!(
        concat!(
            "<div class=\"reflection-box\" id=\"{widget}\">",
            "<div class=\"reflection-title\">Reflection Question</div>",
            "<div class=\"reflection-question\">{question}</div>",
            "<div class=\"reflection-choices\">{choices}</div>",
            "</div>"
        ),
        widget = widget,
        question = question,
        choices = choices,
    )
}
