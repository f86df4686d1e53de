//! Restore table for deleted sprites.
//!
//! Maps a sprite id to the [`ReversibleAction`] the host returned when the
//! sprite was deleted. An entry is removed only once its undo succeeds, so a
//! sprite is restored at most once per deletion.

use std::collections::HashMap;

use crate::host::ReversibleAction;

/// Pending restore actions keyed by sprite id.
#[derive(Default)]
pub struct RestoreTable {
    actions: HashMap<String, Box<dyn ReversibleAction>>,
}

impl RestoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the restore action for `id`, replacing any earlier one.
    pub fn record(&mut self, id: impl Into<String>, action: Box<dyn ReversibleAction>) {
        let id = id.into();
        if self.actions.insert(id.clone(), action).is_some() {
            tracing::debug!(sprite = %id, "replaced pending restore action");
        }
    }

    /// Remove and return the restore action for `id`.
    pub fn take(&mut self, id: &str) -> Option<Box<dyn ReversibleAction>> {
        self.actions.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
