//! Render scheduling: viewport culling and level of detail.
//!
//! Classifies every artifact against the current transform so the host
//! renders only what can be seen. Offscreen artifacts are skipped entirely
//! (not even a placeholder) unless force-mounted for an in-flight focus
//! operation; onscreen artifacts render as placeholders below the zoom
//! threshold and in full above it.
//!
//! Instructions are keyed by identity, so a placeholder→full transition
//! re-describes the same artifact and any selection or drag state the host
//! has attached to it carries over.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use atelier_core::{
    geometry::{Point, Rect, Size},
    identifier::ArtifactId,
    transform::Transform,
};

use crate::config::{RenderConfig, ViewportMode};

/// How one artifact should be rendered this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Outside the inflated viewport: render nothing.
    Skip,
    /// Onscreen but below the zoom threshold: render a cheap placeholder.
    Placeholder,
    /// Onscreen at sufficient zoom: render full preview content.
    Full,
}

/// The per-artifact output of one scheduling pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderInstruction {
    id: ArtifactId,
    screen_rect: Rect,
    mode: RenderMode,
    viewport_mode: ViewportMode,
}

impl RenderInstruction {
    /// The artifact this instruction describes.
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// The artifact's rect in screen space under the current transform.
    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    /// How to render the artifact.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The responsive mode the frame is rendered at.
    pub fn viewport_mode(&self) -> ViewportMode {
        self.viewport_mode
    }
}

/// Plans one frame of rendering.
pub struct RenderScheduler<'a> {
    config: &'a RenderConfig,
}

impl<'a> RenderScheduler<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// The viewport rect inflated by the cull buffer, in screen space.
    pub fn visible_window(&self, viewport: Size) -> Rect {
        Rect::new(Point::new(0.0, 0.0), viewport).inflate(self.config.cull_buffer())
    }

    /// Classifies every artifact for the current frame.
    ///
    /// `force_mounted` artifacts stay mounted even while offscreen; a focus
    /// operation needs its target mounted to re-measure it.
    pub fn plan(
        &self,
        transform: Transform,
        viewport: Size,
        rects: &IndexMap<ArtifactId, Rect>,
        viewport_mode: ViewportMode,
        force_mounted: &IndexSet<ArtifactId>,
    ) -> Vec<RenderInstruction> {
        let window = self.visible_window(viewport);
        let detail = if transform.scale() < self.config.placeholder_zoom() {
            RenderMode::Placeholder
        } else {
            RenderMode::Full
        };

        rects
            .iter()
            .map(|(&id, &rect)| {
                let screen_rect = transform.rect_to_screen(rect);
                let onscreen = screen_rect.intersects(window) || force_mounted.contains(&id);
                let mode = if onscreen { detail } else { RenderMode::Skip };
                RenderInstruction {
                    id,
                    screen_rect,
                    mode,
                    viewport_mode,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rects(entries: &[(&str, f32, f32, f32, f32)]) -> IndexMap<ArtifactId, Rect> {
        entries
            .iter()
            .map(|(name, x, y, w, h)| {
                (
                    ArtifactId::new(name),
                    Rect::new(Point::new(*x, *y), Size::new(*w, *h)),
                )
            })
            .collect()
    }

    fn plan(
        config: &RenderConfig,
        transform: Transform,
        rects: &IndexMap<ArtifactId, Rect>,
        force_mounted: &IndexSet<ArtifactId>,
    ) -> Vec<RenderInstruction> {
        RenderScheduler::new(config).plan(
            transform,
            Size::new(1200.0, 800.0),
            rects,
            ViewportMode::Desktop,
            force_mounted,
        )
    }

    #[test]
    fn test_offscreen_artifacts_skipped() {
        let config = RenderConfig::default();
        let rects = rects(&[
            ("visible", 100.0, 100.0, 200.0, 150.0),
            ("far-away", 50_000.0, 50_000.0, 200.0, 150.0),
        ]);

        let instructions = plan(&config, Transform::default(), &rects, &IndexSet::new());
        assert_eq!(instructions[0].mode(), RenderMode::Full);
        assert_eq!(instructions[1].mode(), RenderMode::Skip);
    }

    #[test]
    fn test_buffer_keeps_near_offscreen_mounted() {
        let config = RenderConfig::default();
        // Just past the right edge, inside the 400 px buffer
        let rects = rects(&[("near", 1400.0, 100.0, 200.0, 150.0)]);

        let instructions = plan(&config, Transform::default(), &rects, &IndexSet::new());
        assert_eq!(instructions[0].mode(), RenderMode::Full);
    }

    #[test]
    fn test_low_zoom_renders_placeholders() {
        let config = RenderConfig::default();
        let rects = rects(&[("page", 100.0, 100.0, 2000.0, 1500.0)]);
        let transform = Transform::new(0.1, Point::default());

        let instructions = plan(&config, transform, &rects, &IndexSet::new());
        assert_eq!(instructions[0].mode(), RenderMode::Placeholder);
    }

    #[test]
    fn test_force_mounted_survives_culling() {
        let config = RenderConfig::default();
        let rects = rects(&[("target", 50_000.0, 50_000.0, 200.0, 150.0)]);
        let mut force_mounted = IndexSet::new();
        force_mounted.insert(ArtifactId::new("target"));

        let instructions = plan(&config, Transform::default(), &rects, &force_mounted);
        assert_eq!(instructions[0].mode(), RenderMode::Full);
    }

    #[test]
    fn test_screen_rect_follows_transform() {
        let config = RenderConfig::default();
        let rects = rects(&[("page", 100.0, 100.0, 200.0, 150.0)]);
        let transform = Transform::new(2.0, Point::new(50.0, -20.0));

        let instructions = plan(&config, transform, &rects, &IndexSet::new());
        let screen = instructions[0].screen_rect();
        assert_eq!(screen.origin(), Point::new(250.0, 180.0));
        assert_eq!(screen.size(), Size::new(400.0, 300.0));
    }

    proptest! {
        /// An artifact classified offscreen never intersects the inflated
        /// viewport rect, and with a zero buffer nothing fully inside the
        /// raw viewport is skipped.
        #[test]
        fn prop_culling_never_skips_visible(
            x in -10_000.0f32..10_000.0,
            y in -10_000.0f32..10_000.0,
            w in 1.0f32..2_000.0,
            h in 1.0f32..2_000.0,
            scale in 0.05f32..8.0,
            tx in -5_000.0f32..5_000.0,
            ty in -5_000.0f32..5_000.0,
            buffer in 0.0f32..800.0,
        ) {
            let config: RenderConfig = serde_json::from_str(
                &format!("{{\"cull_buffer\": {buffer}}}")
            ).unwrap();
            let transform = Transform::new(scale, Point::new(tx, ty));
            let rects = rects(&[("a", x, y, w, h)]);

            let scheduler = RenderScheduler::new(&config);
            let viewport = Size::new(1200.0, 800.0);
            let window = scheduler.visible_window(viewport);
            let instructions = scheduler.plan(
                transform,
                viewport,
                &rects,
                ViewportMode::Desktop,
                &IndexSet::new(),
            );

            let screen_rect = instructions[0].screen_rect();
            match instructions[0].mode() {
                RenderMode::Skip => prop_assert!(!screen_rect.intersects(window)),
                _ => prop_assert!(screen_rect.intersects(window)),
            }
        }
    }
}
