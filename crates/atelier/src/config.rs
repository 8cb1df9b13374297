//! Configuration types for the Atelier canvas engine.
//!
//! This module provides configuration structures that control frame sizing,
//! layout spacing, zoom bounds, and render scheduling. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources; every
//! field has a sensible default so a partial (or absent) configuration file
//! works.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Frame dimensions, spacing, and planner tuning.
//! - [`ViewportConfig`] - Zoom bounds and focus behavior.
//! - [`RenderConfig`] - Culling buffer, level-of-detail threshold, and
//!   responsive breakpoints.
//! - [`StyleConfig`] - Visual styling for the SVG export.

use serde::{Deserialize, Serialize};

use atelier_core::geometry::Size;

/// The canvas-wide responsive preview mode.
///
/// Selects which breakpoint dimensions page artifacts are rendered at; the
/// chosen dimensions feed back into connection routing and culling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Viewport configuration section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Render scheduling configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Frame sizing and planner spacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Default frame width for artifacts without a size hint.
    frame_width: f32,

    /// Default frame height for artifacts without a size hint.
    frame_height: f32,

    /// Gap between grid cells.
    spacing: f32,

    /// Vertical room reserved above each grid row for group headers.
    header_allowance: f32,

    /// Number of frames per grid row.
    frames_per_row: usize,

    /// Horizontal gap between chain elements in relationship layout.
    horizontal_gap: f32,

    /// Vertical gap between chain rows and stacked children.
    vertical_gap: f32,

    /// Fraction of the horizontal distance used to reach Bézier control
    /// points when routing connections.
    curvature: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            frame_width: 400.0,
            frame_height: 300.0,
            spacing: 80.0,
            header_allowance: 60.0,
            frames_per_row: 6,
            horizontal_gap: 120.0,
            vertical_gap: 100.0,
            curvature: 0.4,
        }
    }
}

impl LayoutConfig {
    /// Default frame size for artifacts without a size hint.
    pub fn frame_size(&self) -> Size {
        Size::new(self.frame_width, self.frame_height)
    }

    /// Gap between grid cells.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Vertical room reserved above grid rows for group headers.
    pub fn header_allowance(&self) -> f32 {
        self.header_allowance
    }

    /// Number of frames per grid row.
    pub fn frames_per_row(&self) -> usize {
        self.frames_per_row
    }

    /// Horizontal gap between chain elements.
    pub fn horizontal_gap(&self) -> f32 {
        self.horizontal_gap
    }

    /// Vertical gap between chain rows and stacked children.
    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }

    /// Bézier control point reach as a fraction of horizontal distance.
    pub fn curvature(&self) -> f32 {
        self.curvature
    }
}

/// Zoom bounds and focus behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Minimum zoom factor.
    min_zoom: f32,

    /// Maximum zoom factor.
    max_zoom: f32,

    /// Fractional padding kept around a focused artifact.
    focus_padding: f32,

    /// Screen-pixel drift above which a focus correction nudges the view.
    focus_drift_threshold: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 4.0,
            focus_padding: 0.15,
            focus_drift_threshold: 2.0,
        }
    }
}

impl ViewportConfig {
    /// Minimum zoom factor.
    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    /// Maximum zoom factor.
    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Clamps a scale factor to the configured zoom bounds.
    pub fn clamp_zoom(&self, scale: f32) -> f32 {
        scale.clamp(self.min_zoom, self.max_zoom)
    }

    /// Fractional padding kept around a focused artifact.
    pub fn focus_padding(&self) -> f32 {
        self.focus_padding
    }

    /// Screen-pixel drift above which a focus correction nudges the view.
    pub fn focus_drift_threshold(&self) -> f32 {
        self.focus_drift_threshold
    }
}

/// Culling and level-of-detail scheduling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Screen-pixel buffer added around the viewport before culling.
    cull_buffer: f32,

    /// Zoom factor below which onscreen artifacts render as placeholders.
    placeholder_zoom: f32,

    /// Frame dimensions per responsive breakpoint.
    breakpoints: BreakpointConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cull_buffer: 400.0,
            placeholder_zoom: 0.35,
            breakpoints: BreakpointConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Screen-pixel buffer added around the viewport before culling.
    pub fn cull_buffer(&self) -> f32 {
        self.cull_buffer
    }

    /// Zoom factor below which onscreen artifacts render as placeholders.
    pub fn placeholder_zoom(&self) -> f32 {
        self.placeholder_zoom
    }

    /// Frame dimensions per responsive breakpoint.
    pub fn breakpoints(&self) -> &BreakpointConfig {
        &self.breakpoints
    }
}

/// Page frame dimensions for each [`ViewportMode`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BreakpointConfig {
    desktop: Size,
    tablet: Size,
    mobile: Size,
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            desktop: Size::new(1280.0, 800.0),
            tablet: Size::new(768.0, 1024.0),
            mobile: Size::new(375.0, 667.0),
        }
    }
}

impl BreakpointConfig {
    /// Returns the page frame size for the given viewport mode.
    pub fn frame_size(&self, mode: ViewportMode) -> Size {
        match mode {
            ViewportMode::Desktop => self.desktop,
            ViewportMode::Tablet => self.tablet,
            ViewportMode::Mobile => self.mobile,
        }
    }
}

/// Visual styling for the SVG export.
///
/// Colors are passed through verbatim as SVG attribute values; fields that
/// are not set fall back to exporter defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas background color.
    background_color: Option<String>,

    /// Frame fill color.
    frame_fill: Option<String>,

    /// Connection stroke color.
    edge_stroke: Option<String>,
}

impl StyleConfig {
    /// Canvas background color, if configured.
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    /// Frame fill color, if configured.
    pub fn frame_fill(&self) -> Option<&str> {
        self.frame_fill.as_deref()
    }

    /// Connection stroke color, if configured.
    pub fn edge_stroke(&self) -> Option<&str> {
        self.edge_stroke.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let config = AppConfig::default();
        assert!(config.layout().frames_per_row() >= 1);
        assert!(config.viewport().min_zoom() > 0.0);
        assert!(config.viewport().max_zoom() > config.viewport().min_zoom());
        assert!(config.render().cull_buffer() >= 0.0);
    }

    #[test]
    fn test_clamp_zoom() {
        let viewport = ViewportConfig::default();
        assert_approx_eq!(f32, viewport.clamp_zoom(100.0), viewport.max_zoom());
        assert_approx_eq!(f32, viewport.clamp_zoom(0.0001), viewport.min_zoom());
        assert_approx_eq!(f32, viewport.clamp_zoom(1.0), 1.0);
    }

    #[test]
    fn test_breakpoint_frame_sizes_differ() {
        let breakpoints = BreakpointConfig::default();
        let desktop = breakpoints.frame_size(ViewportMode::Desktop);
        let mobile = breakpoints.frame_size(ViewportMode::Mobile);
        assert!(desktop.width() > mobile.width());
    }

    #[test]
    fn test_partial_deserialization() {
        let config: AppConfig = serde_json::from_str(
            r##"{ "layout": { "frames_per_row": 3 }, "style": { "background_color": "#0f172a" } }"##,
        )
        .unwrap();

        assert_eq!(config.layout().frames_per_row(), 3);
        // Unspecified fields keep their defaults
        assert_approx_eq!(f32, config.layout().spacing(), 80.0);
        assert_eq!(config.style().background_color(), Some("#0f172a"));
        assert_eq!(config.style().frame_fill(), None);
    }
}
