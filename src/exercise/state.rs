//! Linear exercise phase state machine.
//!
//! Five working phases plus a completion screen. Each phase gates
//! advancement on local predicate checks over form inputs; completion
//! flags are mutated only by the matching phase's check function and
//! read only by that phase's gate. Restart resets everything wholesale.

use tracing::info;

use crate::exercise::config::ExerciseConfig;

/// Phases of the guided exercise, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExercisePhase {
    /// Introduction screen; always advanceable.
    Intro,
    /// Requirements checklist + reflection question.
    Requirements,
    /// Data selection drop + quality checklist.
    DataSelection,
    /// Step ordering.
    StepOrdering,
    /// Final decision question.
    Decision,
    /// Completion screen.
    Complete,
}

impl ExercisePhase {
    /// All phases in order.
    pub const ALL: [Self; 6] = [
        Self::Intro,
        Self::Requirements,
        Self::DataSelection,
        Self::StepOrdering,
        Self::Decision,
        Self::Complete,
    ];

    /// Zero-based position in the progression.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// The next phase, saturating at [`Self::Complete`].
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Self::Complete)
    }
}

/// Owned wizard state: the current phase plus per-phase completion
/// flags.
#[derive(Debug, Clone)]
pub struct ExerciseState {
    config: ExerciseConfig,
    phase: ExercisePhase,
    requirements_complete: bool,
    reflection_complete: bool,
    data_selection_complete: bool,
    quality_complete: bool,
    step_ordering_complete: bool,
    decision_complete: bool,
}

impl ExerciseState {
    /// Creates a fresh wizard at the introduction phase.
    #[must_use]
    pub const fn new(config: ExerciseConfig) -> Self {
        Self {
            config,
            phase: ExercisePhase::Intro,
            requirements_complete: false,
            reflection_complete: false,
            data_selection_complete: false,
            quality_complete: false,
            step_ordering_complete: false,
            decision_complete: false,
        }
    }

    /// The exercise definition this state was built from.
    #[must_use]
    pub const fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> ExercisePhase {
        self.phase
    }

    /// Progress through the four working phases, as a percentage.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        match self.phase {
            ExercisePhase::Complete => 100,
            // Intro is phase 0 of 4 working phases.
            phase => u8::try_from(phase.index() * 100 / 4).unwrap_or(100),
        }
    }

    /// Records the requirements checklist state.
    pub fn check_requirements(&mut self, checked: usize) {
        let total = self.config.requirements.items.len();
        self.requirements_complete = total > 0 && checked == total;
    }

    /// Records the reflection question state.
    pub fn check_reflection(&mut self, choice: &str, text: &str) {
        self.reflection_complete =
            choice == self.config.reflection.expected
                && text.trim().len() > self.config.reflection.min_length;
    }

    /// Records the data selection drop outcome.
    pub fn record_data_selection(&mut self, completed: bool) {
        self.data_selection_complete = completed;
    }

    /// Records the quality checklist state.
    pub fn check_quality(&mut self, checked: usize) {
        let total = self.config.quality.items.len();
        self.quality_complete = total > 0 && checked == total;
    }

    /// Records the step ordering outcome.
    pub fn record_step_ordering(&mut self, completed: bool) {
        self.step_ordering_complete = completed;
    }

    /// Records the decision question state.
    pub fn check_decision(&mut self, choice: &str, text: &str) {
        self.decision_complete = choice == self.config.decision.expected
            && text.trim().len() > self.config.decision.min_length;
    }

    /// Whether the current phase's gate is satisfied.
    #[must_use]
    pub const fn can_advance(&self) -> bool {
        match self.phase {
            ExercisePhase::Intro => true,
            ExercisePhase::Requirements => {
                self.requirements_complete && self.reflection_complete
            }
            ExercisePhase::DataSelection => {
                self.data_selection_complete && self.quality_complete
            }
            ExercisePhase::StepOrdering => self.step_ordering_complete,
            ExercisePhase::Decision => self.decision_complete,
            ExercisePhase::Complete => false,
        }
    }

    /// Advances to the next phase when the gate is satisfied.
    ///
    /// Returns the new phase, or `None` when the gate is not met.
    pub fn advance(&mut self) -> Option<ExercisePhase> {
        if !self.can_advance() {
            return None;
        }
        let from = self.phase;
        self.phase = self.phase.next();
        info!(?from, to = ?self.phase, "exercise phase advanced");
        Some(self.phase)
    }

    /// Resets the wizard wholesale back to the introduction.
    pub fn restart(&mut self) {
        info!("exercise restarted");
        *self = Self::new(self.config.clone());
    }
}
