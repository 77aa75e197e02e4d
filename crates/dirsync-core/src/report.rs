//! Outcome of a sync run

use serde::{Deserialize, Serialize};

use crate::{Action, ActionKind};

/// Actions applied by a sync, or planned by a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// True when nothing was written and `actions` is only the plan
    pub dry_run: bool,
    actions: Vec<Action>,
}

impl SyncReport {
    /// An empty report for a run that mutates the destination.
    pub fn applied() -> Self {
        Self::default()
    }

    /// A report listing planned actions that were not applied.
    pub fn planned(actions: Vec<Action>) -> Self {
        Self {
            dry_run: true,
            actions,
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when the destination already matched the source.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }

    pub fn copied(&self) -> usize {
        self.count(ActionKind::Copy)
    }

    pub fn moved(&self) -> usize {
        self.count(ActionKind::Move)
    }

    pub fn deleted(&self) -> usize {
        self.count(ActionKind::Delete)
    }
}
