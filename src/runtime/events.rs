//! UI event subscription table.
//!
//! Both pipelines react only to named browser-style events. The table
//! maps `(event kind, target id)` to handlers and is built once at
//! initialization; dispatching an event nobody subscribed to is a
//! defensive no-op.

use std::collections::HashMap;

use tracing::trace;

/// Browser-style event kinds the pipelines react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer click.
    Click,
    /// Form control value change.
    Change,
    /// Text input.
    Input,
    /// Drag started on a draggable item.
    DragStart,
    /// Drag ended.
    DragEnd,
    /// Dragged item entered a drop zone.
    DragEnter,
    /// Dragged item left a drop zone.
    DragLeave,
    /// Item dropped on a drop zone.
    Drop,
    /// Key pressed.
    KeyDown,
}

/// One dispatched UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Target id the event fired on.
    pub target: String,
    /// Optional payload (drag data, key name, control value).
    pub detail: Option<String>,
}

impl UiEvent {
    /// Creates an event without a payload.
    #[must_use]
    pub fn new(kind: EventKind, target: &str) -> Self {
        Self {
            kind,
            target: target.to_string(),
            detail: None,
        }
    }

    /// Creates an event carrying a payload.
    #[must_use]
    pub fn with_detail(kind: EventKind, target: &str, detail: &str) -> Self {
        Self {
            kind,
            target: target.to_string(),
            detail: Some(detail.to_string()),
        }
    }
}

type Handler = Box<dyn Fn(&UiEvent) + Send + Sync>;

/// Subscription table built once at pipeline initialization.
#[derive(Default)]
pub struct SubscriptionTable {
    handlers: HashMap<(EventKind, String), Vec<Handler>>,
}

impl SubscriptionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an event kind on a target.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        target: &str,
        handler: impl Fn(&UiEvent) + Send + Sync + 'static,
    ) {
        self.handlers
            .entry((kind, target.to_string()))
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatches an event to every matching handler.
    ///
    /// Returns the number of handlers invoked; zero means nobody was
    /// subscribed and the event was ignored.
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        let key = (event.kind, event.target.clone());
        self.handlers.get(&key).map_or(0, |handlers| {
            trace!(?event.kind, target = %event.target, count = handlers.len(), "dispatch");
            for handler in handlers {
                handler(event);
            }
            handlers.len()
        })
    }

    /// Number of `(kind, target)` subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table has no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for SubscriptionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionTable")
            .field("subscriptions", &self.handlers.len())
            .finish_non_exhaustive()
    }
}
