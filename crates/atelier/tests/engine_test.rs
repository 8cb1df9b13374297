//! Integration tests for the CanvasEngine pipeline.
//!
//! These exercise the public API end to end: layout planning in both modes,
//! override precedence, edge routing, and SVG export.

use indexmap::{IndexMap, IndexSet};

use atelier::{
    CanvasEngine,
    artifact::{Artifact, ArtifactKind, ArtifactSet, Relationships},
    config::{AppConfig, ViewportMode},
    geometry::{Point, Size},
    identifier::ArtifactId,
    layout::{LayoutMode, grid::GroupingMode},
    render::RenderMode,
    transform::Transform,
    viewport::ViewportController,
};

fn page(name: &str, next: &[&str]) -> Artifact {
    Artifact::new(ArtifactId::new(name), ArtifactKind::Page).with_relationships(
        Relationships::default().with_next(next.iter().map(|n| ArtifactId::new(n)).collect()),
    )
}

fn id(name: &str) -> ArtifactId {
    ArtifactId::new(name)
}

#[test]
fn test_chain_layout_and_edges() {
    // P1 -> P2 -> P3: one row, x strictly increasing, two flow edges
    let set = ArtifactSet::new(
        vec![page("p1", &["p2"]), page("p2", &["p3"]), page("p3", &[])],
        1,
    );
    let engine = CanvasEngine::new(AppConfig::default());

    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );
    let positions = layout.positions();
    assert_eq!(positions.len(), 3);
    assert!(positions[&id("p1")].x() < positions[&id("p2")].x());
    assert!(positions[&id("p2")].x() < positions[&id("p3")].x());

    let edges = engine.route(&set, &layout, &IndexMap::new(), ViewportMode::Desktop);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].from(), id("p1"));
    assert_eq!(edges[0].to(), id("p2"));
    assert_eq!(edges[1].from(), id("p2"));
    assert_eq!(edges[1].to(), id("p3"));
}

#[test]
fn test_shared_target_yields_one_frame_and_one_teleport() {
    // A -> B and C -> B
    let set = ArtifactSet::new(
        vec![page("a", &["b"]), page("b", &[]), page("c", &["b"])],
        1,
    );
    let engine = CanvasEngine::new(AppConfig::default());

    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );
    assert_eq!(layout.positions().len(), 3);
    assert_eq!(layout.teleports().len(), 1);
    assert_eq!(layout.teleports()[0].target(), id("b"));

    // Both edges terminate at B's authoritative anchors
    let edges = engine.route(&set, &layout, &IndexMap::new(), ViewportMode::Desktop);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].to_point(), edges[1].to_point());
}

#[test]
fn test_cycle_terminates() {
    let set = ArtifactSet::new(vec![page("x", &["y"]), page("y", &["x"])], 1);
    let engine = CanvasEngine::new(AppConfig::default());

    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );
    assert_eq!(layout.positions().len(), 2);
}

#[test]
fn test_grid_mode_emits_headers() {
    let set = ArtifactSet::new(
        vec![page("1-a", &[]), page("1-b", &[]), page("2-a", &[])],
        1,
    );
    let engine = CanvasEngine::new(AppConfig::default());

    let layout = engine.compute_layout(
        &set,
        LayoutMode::Grid,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );
    assert_eq!(layout.positions().len(), 3);
    let headers: Vec<&str> = layout.headers().iter().map(|h| h.text()).collect();
    assert_eq!(headers, vec!["1", "2"]);
    assert!(layout.teleports().is_empty());
}

#[test]
fn test_override_precedence_in_routing() {
    let set = ArtifactSet::new(vec![page("a", &["b"]), page("b", &[])], 1);
    let engine = CanvasEngine::new(AppConfig::default());
    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );

    let mut overrides = IndexMap::new();
    overrides.insert(id("b"), Point::new(5000.0, 5000.0));

    let computed = engine.route(&set, &layout, &IndexMap::new(), ViewportMode::Desktop);
    let overridden = engine.route(&set, &layout, &overrides, ViewportMode::Desktop);

    // The overridden position moves B's anchor, the computed one does not
    assert_ne!(computed[0].to_point(), overridden[0].to_point());
    assert_eq!(overridden[0].to_point().x(), 5000.0);
}

#[test]
fn test_viewport_mode_changes_page_dimensions() {
    let set = ArtifactSet::new(vec![page("a", &["b"]), page("b", &[])], 1);
    let engine = CanvasEngine::new(AppConfig::default());
    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );

    let desktop = engine.route(&set, &layout, &IndexMap::new(), ViewportMode::Desktop);
    let mobile = engine.route(&set, &layout, &IndexMap::new(), ViewportMode::Mobile);

    // The source anchor sits on the frame's right edge, which narrows on mobile
    assert!(desktop[0].from_point().x() > mobile[0].from_point().x());
}

#[test]
fn test_empty_set_yields_empty_state() {
    let set = ArtifactSet::new(vec![], 7);
    let engine = CanvasEngine::new(AppConfig::default());

    let layout = engine.compute_layout(
        &set,
        LayoutMode::Grid,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );
    assert!(layout.is_empty());
    assert_eq!(layout.generation(), 7);

    let edges = engine.route(&set, &layout, &IndexMap::new(), ViewportMode::Desktop);
    assert!(edges.is_empty());
}

#[test]
fn test_plan_render_culls_distant_frames() {
    // A long chain spreads far to the right; at 1:1 zoom only its head is
    // visible in a small viewport
    let set = ArtifactSet::new(
        vec![
            page("p1", &["p2"]),
            page("p2", &["p3"]),
            page("p3", &["p4"]),
            page("p4", &[]),
        ],
        1,
    );
    let engine = CanvasEngine::new(AppConfig::default());
    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );

    let instructions = engine.plan_render(
        &set,
        &layout,
        &IndexMap::new(),
        Transform::default(),
        Size::new(1200.0, 800.0),
        ViewportMode::Desktop,
        &IndexSet::new(),
    );

    assert_eq!(instructions.len(), 4);
    assert_eq!(instructions[0].mode(), RenderMode::Full);
    assert_eq!(instructions[3].mode(), RenderMode::Skip);
}

#[test]
fn test_drag_override_feeds_back_into_routing() {
    // Drive the controller like a host would, then reroute with its
    // overrides: the settled drag position becomes authoritative
    let set = ArtifactSet::new(vec![page("a", &["b"]), page("b", &[])], 1);
    let engine = CanvasEngine::new(AppConfig::default());
    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );

    let mut controller = ViewportController::new(
        engine.config().viewport().clone(),
        Size::new(1200.0, 800.0),
    );
    let origin = layout.positions()[&id("b")];
    controller.pointer_down(Point::new(0.0, 0.0), Some((id("b"), origin)));
    controller.pointer_move(Point::new(500.0, 500.0));
    let (dragged, settled) = controller.pointer_up().unwrap();
    assert_eq!(dragged, id("b"));

    let edges = engine.route(&set, &layout, controller.overrides(), ViewportMode::Desktop);
    assert_eq!(edges[0].to_point().x(), settled.x());
}

#[test]
fn test_render_svg_end_to_end() {
    let set = ArtifactSet::new(
        vec![page("a", &["b"]), page("b", &[]), page("c", &["b"])],
        1,
    );
    let engine = CanvasEngine::new(AppConfig::default());
    let layout = engine.compute_layout(
        &set,
        LayoutMode::Flow,
        GroupingMode::Prefix,
        ViewportMode::Desktop,
    );

    let svg = engine.render_svg(&set, &layout, &IndexMap::new(), ViewportMode::Desktop);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    // Two flow edges become two curve paths
    assert_eq!(svg.matches("<path").count(), 2);
}
