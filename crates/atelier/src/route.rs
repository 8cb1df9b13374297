//! Connection routing between placed artifacts.
//!
//! Routes every declared relationship edge once positions are final.
//! Anchors sit at the source's right-center and the target's left-center;
//! the connector is a cubic Bézier whose control points reach horizontally
//! in proportion to the distance between the anchors. Edges are derived
//! data: recomputing them is idempotent and they are never persisted.

use indexmap::IndexMap;
use serde::Serialize;

use atelier_core::{
    artifact::ArtifactSet,
    geometry::{Point, Rect, Size},
    identifier::ArtifactId,
};

/// Minimum horizontal reach of a control point, so short hops still curve.
const MIN_CONTROL_REACH: f32 = 40.0;

/// Which relationship produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// A sequential `next` link.
    Flow,
    /// A `children` link.
    Hierarchy,
    /// A `related` link.
    Related,
}

impl EdgeKind {
    fn label(self) -> &'static str {
        match self {
            EdgeKind::Flow => "flow",
            EdgeKind::Hierarchy => "hierarchy",
            EdgeKind::Related => "related",
        }
    }
}

/// One routed connector between two placed artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionEdge {
    id: String,
    from: ArtifactId,
    to: ArtifactId,
    from_point: Point,
    to_point: Point,
    control: (Point, Point),
    kind: EdgeKind,
}

impl ConnectionEdge {
    /// Stable identifier derived from endpoints and kind.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Source identity.
    pub fn from(&self) -> ArtifactId {
        self.from
    }

    /// Target identity.
    pub fn to(&self) -> ArtifactId {
        self.to
    }

    /// Anchor at the source's right-center.
    pub fn from_point(&self) -> Point {
        self.from_point
    }

    /// Anchor at the target's left-center.
    pub fn to_point(&self) -> Point {
        self.to_point
    }

    /// The two cubic Bézier control points.
    pub fn control(&self) -> (Point, Point) {
        self.control
    }

    /// Which relationship produced this edge.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// Routes connection edges from authoritative positions and dimensions.
pub struct Router<'a> {
    positions: &'a IndexMap<ArtifactId, Point>,
    sizes: &'a IndexMap<ArtifactId, Size>,
    curvature: f32,
}

impl<'a> Router<'a> {
    /// Creates a router over authoritative positions (overrides already
    /// merged) and the current rendered dimensions.
    pub fn new(
        positions: &'a IndexMap<ArtifactId, Point>,
        sizes: &'a IndexMap<ArtifactId, Size>,
        curvature: f32,
    ) -> Self {
        Self {
            positions,
            sizes,
            curvature,
        }
    }

    /// Routes every declared edge whose endpoints are present and placed.
    ///
    /// Edges referencing identities outside the set, and edges whose
    /// endpoints are not yet positioned, are dropped silently.
    pub fn route(&self, set: &ArtifactSet) -> Vec<ConnectionEdge> {
        let mut edges = Vec::new();
        for artifact in set.iter() {
            let relationships = artifact.relationships();
            for (targets, kind) in [
                (relationships.next(), EdgeKind::Flow),
                (relationships.children(), EdgeKind::Hierarchy),
                (relationships.related(), EdgeKind::Related),
            ] {
                for &target in targets {
                    if let Some(edge) = self.route_edge(artifact.id(), target, kind) {
                        edges.push(edge);
                    }
                }
            }
        }
        edges
    }

    /// Routes a single edge, or `None` when either endpoint is unplaced.
    fn route_edge(
        &self,
        from: ArtifactId,
        to: ArtifactId,
        kind: EdgeKind,
    ) -> Option<ConnectionEdge> {
        let from_rect = self.rect_of(from)?;
        let to_rect = self.rect_of(to)?;

        let from_point = from_rect.right_center();
        let to_point = to_rect.left_center();

        let reach = ((to_point.x() - from_point.x()).abs() * self.curvature)
            .max(MIN_CONTROL_REACH);
        let control = (
            Point::new(from_point.x() + reach, from_point.y()),
            Point::new(to_point.x() - reach, to_point.y()),
        );

        Some(ConnectionEdge {
            id: format!("{from}--{}-->{to}", kind.label()),
            from,
            to,
            from_point,
            to_point,
            control,
            kind,
        })
    }

    fn rect_of(&self, id: ArtifactId) -> Option<Rect> {
        let position = self.positions.get(&id)?;
        let size = self.sizes.get(&id).copied().unwrap_or_default();
        Some(Rect::new(*position, size))
    }
}
