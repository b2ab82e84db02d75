//! Change notifications.

use std::fmt;

use tracing::debug;
use wsetup_model::WritingSystemDefinition;

/// What changed in a [`WritingSystemSetupModel`](crate::WritingSystemSetupModel).
///
/// Adding or duplicating fires `ItemAddedOrDeleted` before the resulting
/// `SelectionChanged`. Deleting fires `SelectionChanged` (the cursor moves
/// off the doomed item) before `ItemAddedOrDeleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupEvent {
    ItemAddedOrDeleted,
    SelectionChanged,
    CurrentItemUpdated,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) type Listener = Box<dyn FnMut(SetupEvent, &[WritingSystemDefinition])>;

/// Registered listeners, called synchronously in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: SetupEvent, definitions: &[WritingSystemDefinition]) {
        debug!(event = ?event, listeners = self.entries.len(), "Dispatching setup event");
        for (_, listener) in &mut self.entries {
            listener(event, definitions);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
