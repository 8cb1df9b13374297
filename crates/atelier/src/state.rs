//! Persisted canvas state and the storage seam.
//!
//! The canvas keeps one explicit, serializable state blob: the transform,
//! custom position overrides, the active layout/grouping modes, and the
//! selected space. Persistence itself is external; this module only defines
//! the blob, the [`StateStore`] seam it travels through, and the debounce
//! bookkeeping for transform saves.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use atelier_core::{geometry::Point, identifier::ArtifactId, transform::Transform};

use crate::{
    error::AtelierError,
    layout::{LayoutMode, grid::GroupingMode},
};

/// The opaque state blob persisted between sessions.
///
/// Loaded once at startup, written back debounced. Every field has a
/// default so partial blobs from older versions still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    transform: Transform,
    custom_positions: IndexMap<ArtifactId, Point>,
    layout_mode: LayoutMode,
    grouping_mode: GroupingMode,
    selected_space: Option<String>,
}

impl PersistedState {
    /// The persisted pan/zoom transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Custom position overrides by identity.
    pub fn custom_positions(&self) -> &IndexMap<ArtifactId, Point> {
        &self.custom_positions
    }

    /// The persisted layout mode.
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    /// The persisted grouping mode.
    pub fn grouping_mode(&self) -> GroupingMode {
        self.grouping_mode
    }

    /// The selected artifact space, if any.
    pub fn selected_space(&self) -> Option<&str> {
        self.selected_space.as_deref()
    }

    /// Records the current transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Records a custom position override.
    pub fn set_custom_position(&mut self, id: ArtifactId, position: Point) {
        self.custom_positions.insert(id, position);
    }

    /// Replaces all custom position overrides.
    pub fn set_custom_positions(&mut self, positions: IndexMap<ArtifactId, Point>) {
        self.custom_positions = positions;
    }

    /// Removes one custom position override.
    pub fn clear_custom_position(&mut self, id: ArtifactId) {
        self.custom_positions.shift_remove(&id);
    }

    /// Records the layout mode.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
    }

    /// Records the grouping mode.
    pub fn set_grouping_mode(&mut self, mode: GroupingMode) {
        self.grouping_mode = mode;
    }

    /// Records the selected space.
    pub fn set_selected_space(&mut self, space: Option<String>) {
        self.selected_space = space;
    }
}

/// The seam to whatever key-value store persists canvas state.
pub trait StateStore {
    /// Loads the persisted state, or `None` if nothing was stored yet.
    fn load(&mut self) -> Result<Option<PersistedState>, AtelierError>;

    /// Writes the state blob.
    fn save(&mut self, state: &PersistedState) -> Result<(), AtelierError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Option<PersistedState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<Option<PersistedState>, AtelierError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), AtelierError> {
        self.state = Some(state.clone());
        Ok(())
    }
}

/// Trailing-edge debounce bookkeeping for state writes.
///
/// Continuous interactions mark the state dirty on every settle; the host
/// flushes once no new mark has arrived for the configured interval.
#[derive(Debug)]
pub struct SaveDebouncer {
    interval: Duration,
    dirty_since: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            dirty_since: None,
        }
    }

    /// Marks the state dirty at `now`, restarting the quiet period.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    /// Returns true while a write is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Returns true once the quiet period has elapsed and a write is due.
    pub fn should_flush(&self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) => now.duration_since(since) >= self.interval,
            None => false,
        }
    }

    /// Clears the dirty mark after a successful write.
    pub fn flushed(&mut self) {
        self.dirty_since = None;
    }
}
