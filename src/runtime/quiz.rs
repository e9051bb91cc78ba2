//! Reflection quiz controller.
//!
//! Selection is stateless with respect to previous picks: choosing an
//! option first clears every selection and feedback mark on the widget,
//! so re-selection is always allowed and only one option is ever
//! active.

use std::sync::Arc;

use tracing::debug;

use crate::content::document::ReflectionSpec;
use crate::render::reflection::{feedback_id, option_id, radio_id};
use crate::runtime::surface::Surface;

/// Result of a quiz selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index of the chosen option.
    pub choice: usize,
    /// Whether the chosen option is the correct answer.
    pub is_correct: bool,
    /// Feedback text bound to the chosen option.
    pub feedback: String,
}

/// Applies quiz selections to a widget on the surface.
pub struct QuizController {
    surface: Arc<dyn Surface>,
}

impl QuizController {
    /// Creates a controller against the given surface.
    #[must_use]
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface }
    }

    /// Selects an option on a reflection widget.
    ///
    /// Clears all prior marks, marks the chosen option, reveals its
    /// feedback, and checks its radio. Returns `None` (a no-op) when
    /// the widget is not present on the surface or the index is out of
    /// range.
    #[must_use]
    pub fn select(
        &self,
        widget: &str,
        spec: &ReflectionSpec,
        choice: usize,
    ) -> Option<Selection> {
        if !self.surface.exists(widget) {
            debug!(%widget, "reflection widget missing; ignoring selection");
            return None;
        }
        let is_correct = spec.is_correct(choice)?;

        // Clear previous selection and feedback marks.
        for index in 0..spec.option_count() {
            let option = option_id(widget, index);
            for class in ["selected", "correct", "incorrect"] {
                self.surface.remove_class(&option, class);
            }
            let feedback = feedback_id(widget, index);
            for class in ["show", "correct", "incorrect"] {
                self.surface.remove_class(&feedback, class);
            }
            self.surface.set_checked(&radio_id(widget, index), false);
        }

        let verdict = if is_correct { "correct" } else { "incorrect" };
        let option = option_id(widget, choice);
        self.surface.add_class(&option, "selected");
        self.surface.add_class(&option, verdict);

        let feedback = feedback_id(widget, choice);
        self.surface.add_class(&feedback, "show");
        self.surface.add_class(&feedback, verdict);

        self.surface.set_checked(&radio_id(widget, choice), true);

        Some(Selection {
            choice,
            is_correct,
            feedback: spec.feedback_for(choice)?.to_string(),
        })
    }
}

impl std::fmt::Debug for QuizController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizController").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::{Choice, TrueFalseFeedback};
    use crate::runtime::surface::MemorySurface;

    fn mount_widget(surface: &MemorySurface, widget: &str, options: usize) {
        surface.register(widget);
        for index in 0..options {
            surface.register(&option_id(widget, index));
            surface.register(&feedback_id(widget, index));
            surface.register(&radio_id(widget, index));
        }
    }

    fn true_false(correct: bool) -> ReflectionSpec {
        ReflectionSpec::TrueFalse {
            question: "Q?".to_string(),
            correct,
            feedback: TrueFalseFeedback {
                correct: "good".to_string(),
                incorrect: "bad".to_string(),
            },
        }
    }

    fn multiple_choice() -> ReflectionSpec {
        ReflectionSpec::MultipleChoice {
            question: "Q?".to_string(),
            choices: vec![
                Choice {
                    text: "A".to_string(),
                    correct: false,
                    feedback: "not a".to_string(),
                },
                Choice {
                    text: "B".to_string(),
                    correct: true,
                    feedback: "yes b".to_string(),
                },
            ],
        }
    }

    fn setup(spec: &ReflectionSpec) -> (QuizController, Arc<MemorySurface>, &'static str) {
        let surface = Arc::new(MemorySurface::new());
        mount_widget(&surface, "cell-1-reflection", spec.option_count());
        let controller = QuizController::new(Arc::clone(&surface) as Arc<dyn Surface>);
        (controller, surface, "cell-1-reflection")
    }

    #[test]
    fn test_true_false_with_false_answer() {
        let spec = true_false(false);
        let (controller, surface, widget) = setup(&spec);

        // Selecting "True" is incorrect and shows the incorrect branch.
        let selection = controller.select(widget, &spec, 0).unwrap();
        assert!(!selection.is_correct);
        assert_eq!(selection.feedback, "bad");
        assert!(surface.has_class(&option_id(widget, 0), "incorrect"));

        // Selecting "False" is correct and shows the correct branch.
        let selection = controller.select(widget, &spec, 1).unwrap();
        assert!(selection.is_correct);
        assert_eq!(selection.feedback, "good");
        assert!(surface.has_class(&option_id(widget, 1), "correct"));
    }

    #[test]
    fn test_reselection_clears_previous_marks() {
        let spec = multiple_choice();
        let (controller, surface, widget) = setup(&spec);

        controller.select(widget, &spec, 0).unwrap();
        assert!(surface.has_class(&option_id(widget, 0), "selected"));
        assert!(surface.has_class(&feedback_id(widget, 0), "show"));
        assert!(surface.node(&radio_id(widget, 0)).unwrap().checked);

        controller.select(widget, &spec, 1).unwrap();
        assert!(!surface.has_class(&option_id(widget, 0), "selected"));
        assert!(!surface.has_class(&option_id(widget, 0), "incorrect"));
        assert!(!surface.has_class(&feedback_id(widget, 0), "show"));
        assert!(!surface.node(&radio_id(widget, 0)).unwrap().checked);
        assert!(surface.has_class(&option_id(widget, 1), "selected"));
        assert!(surface.has_class(&option_id(widget, 1), "correct"));
        assert!(surface.node(&radio_id(widget, 1)).unwrap().checked);
    }

    #[test]
    fn test_only_selected_feedback_shown() {
        let spec = multiple_choice();
        let (controller, surface, widget) = setup(&spec);

        controller.select(widget, &spec, 1).unwrap();
        assert!(surface.has_class(&feedback_id(widget, 1), "show"));
        assert!(!surface.has_class(&feedback_id(widget, 0), "show"));
    }

    #[test]
    fn test_missing_widget_is_noop() {
        let spec = multiple_choice();
        let surface = Arc::new(MemorySurface::new());
        let controller = QuizController::new(Arc::clone(&surface) as Arc<dyn Surface>);
        assert!(controller.select("ghost", &spec, 0).is_none());
    }

    #[test]
    fn test_out_of_range_choice_is_noop() {
        let spec = multiple_choice();
        let (controller, surface, widget) = setup(&spec);
        assert!(controller.select(widget, &spec, 5).is_none());
        assert!(!surface.has_class(&option_id(widget, 0), "selected"));
        assert!(!surface.has_class(&option_id(widget, 1), "selected"));
    }
}
