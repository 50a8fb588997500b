//! Bounded snapshot history for undo/redo.
//!
//! Every committed mutation pushes the pre-mutation scene onto `past` and
//! clears `future`. Undo and redo only move snapshots between the two
//! stacks and `present`; they never clear the opposite stack.
//!
//! Both stacks are capped (10 by default). Pushing past the cap drops the
//! oldest entry, which is then unrecoverable.

use sb_core::Scene;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of snapshots kept in each direction.
pub const DEFAULT_CAPACITY: usize = 10;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// The versioned scene container: present scene plus past/future snapshots.
///
/// Serializes as `{elements, selectedId, past, future}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStore {
    #[serde(flatten)]
    present: Scene,
    /// Oldest first; the back is the most recent undo target.
    #[serde(default)]
    past: VecDeque<Scene>,
    /// The front is the next redo target.
    #[serde(default)]
    future: VecDeque<Scene>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}

impl HistoryStore {
    pub fn new(present: Scene) -> Self {
        Self::with_capacity(present, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(present: Scene, capacity: usize) -> Self {
        Self {
            present,
            past: VecDeque::with_capacity(capacity),
            future: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Change the cap, discarding the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.past.len() > capacity {
            self.past.pop_front();
        }
        while self.future.len() > capacity {
            self.future.pop_back();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current scene (read-only view).
    pub fn snapshot(&self) -> &Scene {
        &self.present
    }

    /// Direct access to the present scene, bypassing history.
    /// Reserved for selection-only changes, which are not undoable.
    pub(crate) fn present_mut(&mut self) -> &mut Scene {
        &mut self.present
    }

    /// Record the current scene, then apply `mutate` to it.
    /// This is the only path by which elements change outside undo/redo.
    pub fn commit(&mut self, mutate: impl FnOnce(&mut Scene)) {
        let before = self.present.clone();
        self.push_past(before);
        self.future.clear();
        mutate(&mut self.present);
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        if self.capacity > 0 {
            self.future.push_front(current);
            while self.future.len() > self.capacity {
                self.future.pop_back();
            }
        }
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    fn push_past(&mut self, scene: Scene) {
        if self.capacity == 0 {
            return;
        }
        while self.past.len() >= self.capacity {
            self.past.pop_front();
            log::trace!("history full, evicted oldest snapshot");
        }
        self.past.push_back(scene);
    }
}
