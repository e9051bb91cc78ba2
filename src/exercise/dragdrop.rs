//! Drag-and-drop controllers for the exercise wizard.
//!
//! Two independent instances: a single-dropzone data selection and a
//! multi-slot step ordering. Both translate drop events into state
//! mutations and completion flags; out-of-range targets are guarded
//! no-ops.

use tracing::debug;

use crate::exercise::config::SelectionSpec;

// ============================================================================
// Data selection
// ============================================================================

/// Outcome of dropping an item on the data selection zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropVerdict {
    /// Whether the dropped item was the accepted one.
    pub accepted: bool,
    /// Feedback message to show.
    pub message: String,
}

/// Single-dropzone selection controller.
///
/// Dropping is always allowed again; a rejected drop clears the
/// completion flag a previous accepted drop may have set.
#[derive(Debug, Clone)]
pub struct DataSelection {
    spec: SelectionSpec,
    complete: bool,
}

impl DataSelection {
    /// Creates a controller for the given selection spec.
    #[must_use]
    pub const fn new(spec: SelectionSpec) -> Self {
        Self {
            spec,
            complete: false,
        }
    }

    /// Handles a drop carrying the item's payload value.
    pub fn drop_item(&mut self, payload: &str) -> DropVerdict {
        let accepted = payload == self.spec.accept;
        self.complete = accepted;
        debug!(payload, accepted, "data selection drop");
        DropVerdict {
            accepted,
            message: if accepted {
                self.spec.success.clone()
            } else {
                self.spec.failure.clone()
            },
        }
    }

    /// Whether the accepted item is currently in the zone.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Clears the zone.
    pub const fn reset(&mut self) {
        self.complete = false;
    }
}

// ============================================================================
// Step ordering
// ============================================================================

/// Per-slot result of an order check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCheck {
    /// Whether every slot holds the right step.
    pub complete: bool,
    /// Per-slot verdicts; `None` for an empty slot.
    pub slots: Vec<Option<bool>>,
}

/// Multi-slot ordering controller.
///
/// Steps are identified by their index in the canonical order; slot
/// `i` is correct when it holds step `i`. Placing onto a filled slot
/// displaces the occupant back to the pool.
#[derive(Debug, Clone)]
pub struct StepOrdering {
    steps: Vec<String>,
    slots: Vec<Option<usize>>,
    available: Vec<usize>,
}

impl StepOrdering {
    /// Creates an ordering over the canonical step list.
    #[must_use]
    pub fn new(steps: Vec<String>) -> Self {
        let count = steps.len();
        Self {
            steps,
            slots: vec![None; count],
            available: (0..count).collect(),
        }
    }

    /// Label of a step, if the id is valid.
    #[must_use]
    pub fn step_label(&self, step: usize) -> Option<&str> {
        self.steps.get(step).map(String::as_str)
    }

    /// Step ids still in the pool, in current pool order.
    #[must_use]
    pub fn available(&self) -> &[usize] {
        &self.available
    }

    /// The step currently in a slot.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied().flatten()
    }

    /// Places a step into a slot, wherever the step currently lives.
    ///
    /// Returns the displaced occupant's id, if the slot was filled.
    /// Out-of-range slot or step ids are guarded no-ops.
    pub fn place(&mut self, slot: usize, step: usize) -> Option<usize> {
        if slot >= self.slots.len() || step >= self.steps.len() {
            debug!(slot, step, "ignoring out-of-range placement");
            return None;
        }

        // Remove the step from the pool or from another slot.
        if let Some(position) = self.available.iter().position(|&s| s == step) {
            self.available.remove(position);
        } else if let Some(previous) = self.slots.iter_mut().find(|s| **s == Some(step)) {
            *previous = None;
        }

        let displaced = self.slots[slot].take();
        if let Some(old) = displaced {
            self.available.push(old);
        }
        self.slots[slot] = Some(step);
        displaced
    }

    /// Returns a slot's step to the pool (click-to-remove).
    pub fn remove(&mut self, slot: usize) -> Option<usize> {
        let step = self.slots.get_mut(slot)?.take()?;
        self.available.push(step);
        Some(step)
    }

    /// Whether every slot is filled.
    #[must_use]
    pub fn all_filled(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Checks the current arrangement against the canonical order.
    #[must_use]
    pub fn check(&self) -> OrderCheck {
        let slots: Vec<Option<bool>> = self
            .slots
            .iter()
            .enumerate()
            .map(|(position, step)| step.map(|s| s == position))
            .collect();
        let complete = !slots.is_empty() && slots.iter().all(|v| *v == Some(true));
        OrderCheck { complete, slots }
    }

    /// Returns every step to the pool in canonical order.
    pub fn reset(&mut self) {
        self.slots.fill(None);
        self.available = (0..self.steps.len()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> DataSelection {
        DataSelection::new(SelectionSpec {
            accept: "good".to_string(),
            success: "yes".to_string(),
            failure: "no".to_string(),
        })
    }

    fn ordering() -> StepOrdering {
        StepOrdering::new(vec![
            "Prepare".to_string(),
            "Train".to_string(),
            "Deploy".to_string(),
        ])
    }

    #[test]
    fn test_accepted_drop_completes() {
        let mut sel = selection();
        let verdict = sel.drop_item("good");
        assert!(verdict.accepted);
        assert_eq!(verdict.message, "yes");
        assert!(sel.is_complete());
    }

    #[test]
    fn test_rejected_drop_clears_completion() {
        let mut sel = selection();
        sel.drop_item("good");
        assert!(sel.is_complete());

        let verdict = sel.drop_item("bad");
        assert!(!verdict.accepted);
        assert_eq!(verdict.message, "no");
        assert!(!sel.is_complete());
    }

    #[test]
    fn test_place_from_pool() {
        let mut ord = ordering();
        assert_eq!(ord.available(), &[0, 1, 2]);
        assert_eq!(ord.place(0, 1), None);
        assert_eq!(ord.slot(0), Some(1));
        assert_eq!(ord.available(), &[0, 2]);
    }

    #[test]
    fn test_place_displaces_occupant_to_pool() {
        let mut ord = ordering();
        ord.place(0, 1);
        let displaced = ord.place(0, 2);
        assert_eq!(displaced, Some(1));
        assert_eq!(ord.slot(0), Some(2));
        assert!(ord.available().contains(&1));
    }

    #[test]
    fn test_place_moves_between_slots() {
        let mut ord = ordering();
        ord.place(0, 1);
        ord.place(2, 1);
        assert_eq!(ord.slot(0), None);
        assert_eq!(ord.slot(2), Some(1));
        // The step is in exactly one place.
        assert!(!ord.available().contains(&1));
    }

    #[test]
    fn test_remove_returns_step_to_pool() {
        let mut ord = ordering();
        ord.place(1, 0);
        assert_eq!(ord.remove(1), Some(0));
        assert_eq!(ord.slot(1), None);
        assert!(ord.available().contains(&0));
    }

    #[test]
    fn test_remove_empty_slot_is_noop() {
        let mut ord = ordering();
        assert_eq!(ord.remove(0), None);
        assert_eq!(ord.remove(99), None);
    }

    #[test]
    fn test_out_of_range_place_is_noop() {
        let mut ord = ordering();
        assert_eq!(ord.place(99, 0), None);
        assert_eq!(ord.place(0, 99), None);
        assert_eq!(ord.available(), &[0, 1, 2]);
    }

    #[test]
    fn test_check_correct_order() {
        let mut ord = ordering();
        ord.place(0, 0);
        ord.place(1, 1);
        ord.place(2, 2);
        assert!(ord.all_filled());
        let check = ord.check();
        assert!(check.complete);
        assert_eq!(check.slots, vec![Some(true), Some(true), Some(true)]);
    }

    #[test]
    fn test_check_wrong_order_marks_slots() {
        let mut ord = ordering();
        ord.place(0, 1);
        ord.place(1, 0);
        ord.place(2, 2);
        let check = ord.check();
        assert!(!check.complete);
        assert_eq!(check.slots, vec![Some(false), Some(false), Some(true)]);
    }

    #[test]
    fn test_check_with_empty_slots_incomplete() {
        let mut ord = ordering();
        ord.place(0, 0);
        let check = ord.check();
        assert!(!check.complete);
        assert_eq!(check.slots[1], None);
    }

    #[test]
    fn test_reset() {
        let mut ord = ordering();
        ord.place(0, 2);
        ord.place(1, 0);
        ord.reset();
        assert_eq!(ord.available(), &[0, 1, 2]);
        assert!(!ord.all_filled());
    }

    #[test]
    fn test_step_labels() {
        let ord = ordering();
        assert_eq!(ord.step_label(1), Some("Train"));
        assert_eq!(ord.step_label(9), None);
    }
}
