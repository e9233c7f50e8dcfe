//! Undo/redo history: deep-copy snapshots of the mutable lineup state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{FieldingGrid, PlayerId};

/// Maximum retained undo entries; the oldest is evicted beyond this.
pub(crate) const HISTORY_LIMIT: usize = 50;

/// Everything the orchestrator mutates, minus derived pitching state.
/// Restoring a snapshot always triggers a pitching recompute from the
/// restored grid, so snapshots deliberately carry no player copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: FieldingGrid,
    pub batting_order: Vec<PlayerId>,
    pub locked_innings: BTreeSet<u8>,
}

/// Two-stack linear history. A fresh mutation clears the redo stack.
#[derive(Debug, Default)]
pub(crate) struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    /// Records the pre-mutation state. Call immediately before committing a
    /// mutation.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        self.undo.push(snapshot);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.remove(0);
        }
    }

    /// Exchanges the live state for the previous snapshot, if any.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Exchanges the live state for the next snapshot, if any.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
