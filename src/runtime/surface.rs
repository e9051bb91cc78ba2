//! Page surface seam.
//!
//! The host page's DOM is an external collaborator; runtime code only
//! mutates named targets through the [`Surface`] trait. Every mutation
//! on a missing target is a silent no-op, since runtime code is
//! decoupled from any guaranteed page structure.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use std::sync::Mutex;

use regex::Regex;

/// Named-target mutation sink for rendered markup.
pub trait Surface: Send + Sync {
    /// Whether a target with this id currently exists.
    fn exists(&self, id: &str) -> bool;

    /// Replaces the target's text content.
    fn set_text(&self, id: &str, text: &str);

    /// Replaces the target's inner markup.
    fn set_html(&self, id: &str, html: &str);

    /// Adds a class to the target.
    fn add_class(&self, id: &str, class: &str);

    /// Removes a class from the target.
    fn remove_class(&self, id: &str, class: &str);

    /// Sets the target's disabled state.
    fn set_disabled(&self, id: &str, disabled: bool);

    /// Sets the target's checked state.
    fn set_checked(&self, id: &str, checked: bool);
}

// ============================================================================
// MemorySurface
// ============================================================================

/// One node tracked by [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Current text content.
    pub text: String,
    /// Current inner markup.
    pub html: String,
    /// Current class set (sorted for deterministic assertions).
    pub classes: BTreeSet<String>,
    /// Disabled state.
    pub disabled: bool,
    /// Checked state.
    pub checked: bool,
}

static ID_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"id="([^"]+)""#).unwrap());

/// In-memory surface used by the CLI `run` command and by tests.
///
/// Mounting markup with `set_html` registers every `id="..."` found in
/// the fragment, mimicking how inserting HTML into a real page creates
/// its elements.
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Mutex<HashMap<String, Node>>,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target so subsequent mutations apply to it.
    pub fn register(&self, id: &str) {
        self.nodes
            .lock()
            .expect("surface lock poisoned")
            .entry(id.to_string())
            .or_default();
    }

    /// Removes a target, simulating its removal from the page.
    pub fn remove(&self, id: &str) {
        self.nodes
            .lock()
            .expect("surface lock poisoned")
            .remove(id);
    }

    /// Returns a snapshot of the target, if it exists.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<Node> {
        self.nodes
            .lock()
            .expect("surface lock poisoned")
            .get(id)
            .cloned()
    }

    /// Whether the target currently carries the class.
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.classes.contains(class))
    }

    fn with_node(&self, id: &str, mutate: impl FnOnce(&mut Node)) {
        let mut nodes = self.nodes.lock().expect("surface lock poisoned");
        if let Some(node) = nodes.get_mut(id) {
            mutate(node);
        }
    }
}

impl Surface for MemorySurface {
    fn exists(&self, id: &str) -> bool {
        self.nodes
            .lock()
            .expect("surface lock poisoned")
            .contains_key(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        self.with_node(id, |n| n.text = text.to_string());
    }

    fn set_html(&self, id: &str, html: &str) {
        let mut nodes = self.nodes.lock().expect("surface lock poisoned");
        if let Some(node) = nodes.get_mut(id) {
            node.html = html.to_string();
        } else {
            return;
        }
        // Mounting markup creates the elements it declares.
        for capture in ID_ATTR.captures_iter(html) {
            nodes.entry(capture[1].to_string()).or_default();
        }
    }

    fn add_class(&self, id: &str, class: &str) {
        self.with_node(id, |n| {
            n.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, id: &str, class: &str) {
        self.with_node(id, |n| {
            n.classes.remove(class);
        });
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        self.with_node(id, |n| n.disabled = disabled);
    }

    fn set_checked(&self, id: &str, checked: bool) {
        self.with_node(id, |n| n.checked = checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_on_missing_target_are_noops() {
        let surface = MemorySurface::new();
        surface.set_text("ghost", "hello");
        surface.add_class("ghost", "x");
        surface.set_disabled("ghost", true);
        assert!(!surface.exists("ghost"));
        assert!(surface.node("ghost").is_none());
    }

    #[test]
    fn test_register_and_mutate() {
        let surface = MemorySurface::new();
        surface.register("status");
        surface.set_text("status", "Kernel Ready");
        surface.add_class("status", "visible");
        let node = surface.node("status").unwrap();
        assert_eq!(node.text, "Kernel Ready");
        assert!(node.classes.contains("visible"));
    }

    #[test]
    fn test_class_add_remove() {
        let surface = MemorySurface::new();
        surface.register("el");
        surface.add_class("el", "a");
        surface.add_class("el", "b");
        surface.remove_class("el", "a");
        assert!(!surface.has_class("el", "a"));
        assert!(surface.has_class("el", "b"));
    }

    #[test]
    fn test_set_html_registers_declared_ids() {
        let surface = MemorySurface::new();
        surface.register("container");
        surface.set_html(
            "container",
            "<div id=\"cell-1-run\"></div><div id=\"cell-1-output\"></div>",
        );
        assert!(surface.exists("cell-1-run"));
        assert!(surface.exists("cell-1-output"));
    }

    #[test]
    fn test_remove_target() {
        let surface = MemorySurface::new();
        surface.register("el");
        assert!(surface.exists("el"));
        surface.remove("el");
        assert!(!surface.exists("el"));
    }

    #[test]
    fn test_set_html_on_missing_container_is_a_full_noop() {
        let surface = MemorySurface::new();
        surface.set_html("gone", "<div id=\"child\"></div>");
        assert!(!surface.exists("gone"));
        assert!(!surface.exists("child"));
    }
}
