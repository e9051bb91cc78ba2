//! Runtime pieces of the notebook pipeline: the page surface seam, the
//! event subscription table, the run simulation session, and the
//! reflection quiz controller.

pub mod events;
pub mod quiz;
pub mod simulation;
pub mod surface;

pub use events::{EventKind, SubscriptionTable, UiEvent};
pub use quiz::{QuizController, Selection};
pub use simulation::{NotebookSession, RunOutcome, RunWindow};
pub use surface::{MemorySurface, Surface};
