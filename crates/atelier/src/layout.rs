//! Layout planning for the canvas.
//!
//! Two mode-exclusive planners compute content-space positions for every
//! artifact in the current set:
//!
//! - [`grid::GridPlanner`] arranges artifacts into a grid grouped by
//!   category, with forced row breaks so every group starts a new row.
//! - [`flow::FlowPlanner`] lays artifacts out along their declared
//!   relationships: `next` chains on horizontal rows, children stacked
//!   beneath their parents, duplicates represented by [`Teleport`] markers.
//!
//! Both planners are pure functions of their inputs; a [`LayoutResult`]
//! carries the snapshot generation it was computed from so stale results can
//! be rejected via [`ResultSlot`].

pub mod flow;
pub mod grid;
pub mod node;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use atelier_core::{
    artifact::{ArtifactKind, ArtifactSet},
    geometry::{Point, Rect, Size},
    identifier::ArtifactId,
};

use crate::config::{LayoutConfig, RenderConfig, ViewportMode};

/// Which layout strategy is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Category grid with forced row breaks per group.
    #[default]
    Grid,
    /// Relationship-graph layout along `next`/`children` links.
    Flow,
}

/// Synthetic marker standing in for a second-or-later occurrence of an
/// already-placed artifact in relationship layout.
///
/// A teleport owns no content; it only records where the duplicate slot sits
/// and which identity it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teleport {
    rect: Rect,
    target: ArtifactId,
}

impl Teleport {
    /// Creates a teleport marker at `rect` referring to `target`.
    pub fn new(rect: Rect, target: ArtifactId) -> Self {
        Self { rect, target }
    }

    /// The slot the marker occupies.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The identity the marker stands in for.
    pub fn target(&self) -> ArtifactId {
        self.target
    }
}

/// A positioned group header produced by the grid planner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderLabel {
    text: String,
    position: Point,
}

impl HeaderLabel {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// The header text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top-left position of the header in content space.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// The output of one layout pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutResult {
    generation: u64,
    mode: LayoutMode,
    positions: IndexMap<ArtifactId, Point>,
    teleports: Vec<Teleport>,
    headers: Vec<HeaderLabel>,
}

impl LayoutResult {
    /// Creates a result for the given snapshot generation and mode.
    pub fn new(
        generation: u64,
        mode: LayoutMode,
        positions: IndexMap<ArtifactId, Point>,
        teleports: Vec<Teleport>,
        headers: Vec<HeaderLabel>,
    ) -> Self {
        Self {
            generation,
            mode,
            positions,
            teleports,
            headers,
        }
    }

    /// The snapshot generation this result was computed from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The layout mode that produced this result.
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Computed position per identity, in placement order.
    pub fn positions(&self) -> &IndexMap<ArtifactId, Point> {
        &self.positions
    }

    /// Teleport markers, if the flow planner produced any.
    pub fn teleports(&self) -> &[Teleport] {
        &self.teleports
    }

    /// Positioned group headers, if the grid planner produced any.
    pub fn headers(&self) -> &[HeaderLabel] {
        &self.headers
    }

    /// Returns true if the pass saw no artifacts.
    ///
    /// An empty result is the empty-state signal, not an error.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Merges custom overrides over the computed positions.
    ///
    /// An identity with an override never reports its computed position as
    /// authoritative. Overrides for identities not in this result are
    /// ignored.
    pub fn authoritative_positions(
        &self,
        overrides: &IndexMap<ArtifactId, Point>,
    ) -> IndexMap<ArtifactId, Point> {
        self.positions
            .iter()
            .map(|(&id, &position)| (id, overrides.get(&id).copied().unwrap_or(position)))
            .collect()
    }
}

/// Holder for the most recent layout result.
///
/// Applies last-write-wins ordering: a result computed from an older
/// snapshot than the current one is discarded, keeping the previous
/// successful result on display.
#[derive(Debug, Default)]
pub struct ResultSlot {
    current: Option<LayoutResult>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `result` unless a result from a newer snapshot is already
    /// current. Returns whether the result was accepted.
    pub fn apply(&mut self, result: LayoutResult) -> bool {
        if let Some(current) = &self.current {
            if result.generation() < current.generation() {
                log::debug!(
                    stale = result.generation(),
                    current = current.generation();
                    "Discarding stale layout result"
                );
                return false;
            }
        }
        self.current = Some(result);
        true
    }

    /// The current result, if any pass has completed.
    pub fn current(&self) -> Option<&LayoutResult> {
        self.current.as_ref()
    }
}

/// Resolves the rendered content-space size of every artifact in the set.
///
/// A declared size hint wins; otherwise pages take the active breakpoint's
/// frame size and components/groups take the default frame size.
pub fn resolve_sizes(
    set: &ArtifactSet,
    mode: ViewportMode,
    layout: &LayoutConfig,
    render: &RenderConfig,
) -> IndexMap<ArtifactId, Size> {
    set.iter()
        .map(|artifact| {
            let size = artifact.size_hint().unwrap_or_else(|| match artifact.kind() {
                ArtifactKind::Page => render.breakpoints().frame_size(mode),
                ArtifactKind::Component | ArtifactKind::Group => layout.frame_size(),
            });
            (artifact.id(), size)
        })
        .collect()
}

/// Builds the content-space rectangle of every positioned identity.
pub fn position_rects(
    positions: &IndexMap<ArtifactId, Point>,
    sizes: &IndexMap<ArtifactId, Size>,
) -> IndexMap<ArtifactId, Rect> {
    positions
        .iter()
        .map(|(&id, &position)| {
            let size = sizes.get(&id).copied().unwrap_or_default();
            (id, Rect::new(position, size))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use atelier_core::artifact::Artifact;

    use super::*;

    fn result_with_generation(generation: u64) -> LayoutResult {
        let mut positions = IndexMap::new();
        positions.insert(ArtifactId::new("a"), Point::new(0.0, 0.0));
        LayoutResult::new(generation, LayoutMode::Grid, positions, vec![], vec![])
    }

    #[test]
    fn test_result_slot_last_write_wins() {
        let mut slot = ResultSlot::new();
        assert!(slot.apply(result_with_generation(2)));

        // Older generation is rejected, newer and equal accepted
        assert!(!slot.apply(result_with_generation(1)));
        assert_eq!(slot.current().unwrap().generation(), 2);
        assert!(slot.apply(result_with_generation(2)));
        assert!(slot.apply(result_with_generation(5)));
        assert_eq!(slot.current().unwrap().generation(), 5);
    }

    #[test]
    fn test_authoritative_positions_override_wins() {
        let result = result_with_generation(1);
        let mut overrides = IndexMap::new();
        overrides.insert(ArtifactId::new("a"), Point::new(50.0, 75.0));
        overrides.insert(ArtifactId::new("ghost"), Point::new(1.0, 1.0));

        let authoritative = result.authoritative_positions(&overrides);
        assert_eq!(
            authoritative.get(&ArtifactId::new("a")),
            Some(&Point::new(50.0, 75.0))
        );
        // Overrides for identities outside the result do not leak in
        assert!(!authoritative.contains_key(&ArtifactId::new("ghost")));
    }

    #[test]
    fn test_resolve_sizes_prefers_hint() {
        let set = ArtifactSet::new(
            vec![
                Artifact::new(ArtifactId::new("page"), ArtifactKind::Page),
                Artifact::new(ArtifactId::new("card"), ArtifactKind::Component),
                Artifact::new(ArtifactId::new("hinted"), ArtifactKind::Page)
                    .with_size_hint(Size::new(99.0, 33.0)),
            ],
            0,
        );
        let layout = LayoutConfig::default();
        let render = RenderConfig::default();

        let sizes = resolve_sizes(&set, ViewportMode::Mobile, &layout, &render);
        assert_eq!(
            sizes[&ArtifactId::new("page")],
            render.breakpoints().frame_size(ViewportMode::Mobile)
        );
        assert_eq!(sizes[&ArtifactId::new("card")], layout.frame_size());
        assert_eq!(sizes[&ArtifactId::new("hinted")], Size::new(99.0, 33.0));
    }
}
