//! Atelier - the layout and rendering engine behind a design-artifact canvas.
//!
//! Positions generated design artifacts (pages, components, groups) on an
//! unbounded 2-D surface, routes connector curves between related artifacts,
//! and schedules culling/level-of-detail rendering under an interactive
//! pan/zoom transform.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;
pub mod route;
pub mod state;
pub mod viewport;

mod error;

pub use atelier_core::{artifact, geometry, identifier, transform};

pub use error::AtelierError;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use atelier_core::{
    artifact::ArtifactSet,
    geometry::{Point, Size},
    identifier::ArtifactId,
    transform::Transform,
};

use config::{AppConfig, ViewportMode};
use export::svg::SvgExporter;
use layout::{
    LayoutMode, LayoutResult,
    flow::FlowPlanner,
    grid::{GridPlanner, GroupingMode},
    node::NodeArena,
};
use render::{RenderInstruction, RenderScheduler};
use route::{ConnectionEdge, Router};

/// Facade over the layout pipeline.
///
/// A `CanvasEngine` holds the configuration and exposes the pure stages:
/// layout planning, connection routing, and SVG export. Interactive state
/// (transform, overrides) lives in [`viewport::ViewportController`], which
/// hosts drive separately.
///
/// # Examples
///
/// ```
/// use atelier::{CanvasEngine, config::{AppConfig, ViewportMode}};
/// use atelier::layout::{LayoutMode, grid::GroupingMode};
/// use atelier::artifact::{Artifact, ArtifactKind, ArtifactSet};
/// use atelier::identifier::ArtifactId;
///
/// let set = ArtifactSet::new(
///     vec![Artifact::new(ArtifactId::new("01-home"), ArtifactKind::Page)],
///     0,
/// );
///
/// let engine = CanvasEngine::new(AppConfig::default());
/// let layout = engine.compute_layout(
///     &set,
///     LayoutMode::Grid,
///     GroupingMode::Prefix,
///     ViewportMode::Desktop,
/// );
/// assert!(!layout.is_empty());
/// ```
#[derive(Default)]
pub struct CanvasEngine {
    config: AppConfig,
}

impl CanvasEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolves the rendered content-space size of every artifact.
    pub fn resolve_sizes(
        &self,
        set: &ArtifactSet,
        viewport_mode: ViewportMode,
    ) -> IndexMap<ArtifactId, Size> {
        layout::resolve_sizes(set, viewport_mode, self.config.layout(), self.config.render())
    }

    /// Runs one layout pass over the snapshot.
    ///
    /// Pure: the same snapshot, modes, and configuration always produce the
    /// same result. An empty set yields an empty result, which is the
    /// empty-state signal rather than an error.
    pub fn compute_layout(
        &self,
        set: &ArtifactSet,
        mode: LayoutMode,
        grouping: GroupingMode,
        viewport_mode: ViewportMode,
    ) -> LayoutResult {
        if set.is_empty() {
            info!(generation = set.generation(); "Layout pass over empty artifact set");
            return LayoutResult::new(set.generation(), mode, IndexMap::new(), vec![], vec![]);
        }

        let sizes = self.resolve_sizes(set, viewport_mode);
        let result = match mode {
            LayoutMode::Grid => {
                let plan = GridPlanner::new(self.config.layout(), grouping).plan(set);
                let (positions, headers) = plan.positions(&sizes, self.config.layout());
                LayoutResult::new(set.generation(), mode, positions, vec![], headers)
            }
            LayoutMode::Flow => {
                let arena = NodeArena::from_set(set);
                let flow = FlowPlanner::new(
                    &arena,
                    &sizes,
                    self.config.layout().horizontal_gap(),
                    self.config.layout().vertical_gap(),
                )
                .layout();
                let (positions, teleports) = flow.into_parts();
                LayoutResult::new(set.generation(), mode, positions, teleports, vec![])
            }
        };

        debug!(
            placed = result.positions().len(),
            teleports = result.teleports().len();
            "Layout pass complete"
        );
        result
    }

    /// Routes connection edges over the authoritative positions.
    ///
    /// Custom overrides win over computed positions; edges with a missing or
    /// unplaced endpoint are dropped silently.
    pub fn route(
        &self,
        set: &ArtifactSet,
        layout: &LayoutResult,
        overrides: &IndexMap<ArtifactId, Point>,
        viewport_mode: ViewportMode,
    ) -> Vec<ConnectionEdge> {
        let sizes = self.resolve_sizes(set, viewport_mode);
        let positions = layout.authoritative_positions(overrides);
        Router::new(&positions, &sizes, self.config.layout().curvature()).route(set)
    }

    /// Plans one frame of rendering under the given transform.
    ///
    /// Classifies every placed artifact for culling and level of detail;
    /// `force_mounted` identities (an in-flight focus target) stay mounted
    /// even while offscreen.
    #[allow(clippy::too_many_arguments)]
    pub fn plan_render(
        &self,
        set: &ArtifactSet,
        layout: &LayoutResult,
        overrides: &IndexMap<ArtifactId, Point>,
        transform: Transform,
        viewport: Size,
        viewport_mode: ViewportMode,
        force_mounted: &IndexSet<ArtifactId>,
    ) -> Vec<RenderInstruction> {
        let sizes = self.resolve_sizes(set, viewport_mode);
        let positions = layout.authoritative_positions(overrides);
        let rects = layout::position_rects(&positions, &sizes);
        RenderScheduler::new(self.config.render()).plan(
            transform,
            viewport,
            &rects,
            viewport_mode,
            force_mounted,
        )
    }

    /// Renders the layout, with routed edges, to an SVG string.
    pub fn render_svg(
        &self,
        set: &ArtifactSet,
        layout: &LayoutResult,
        overrides: &IndexMap<ArtifactId, Point>,
        viewport_mode: ViewportMode,
    ) -> String {
        let sizes = self.resolve_sizes(set, viewport_mode);
        let positions = layout.authoritative_positions(overrides);
        let rects = layout::position_rects(&positions, &sizes);
        let edges = Router::new(&positions, &sizes, self.config.layout().curvature()).route(set);

        info!(
            frames = rects.len(),
            edges = edges.len();
            "Rendering layout to SVG"
        );
        SvgExporter::new(self.config.style()).render(layout, &rects, &edges)
    }
}
