//! Guided exercise wizard: phase definitions loaded from YAML, the
//! linear phase state machine, and the two drag-and-drop controllers.

pub mod config;
pub mod dragdrop;
pub mod state;

pub use config::{ChecklistSpec, ExerciseConfig, ResponseSpec, SelectionSpec};
pub use dragdrop::{DataSelection, DropVerdict, OrderCheck, StepOrdering};
pub use state::{ExercisePhase, ExerciseState};
