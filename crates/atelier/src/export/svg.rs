//! SVG rendering of a computed canvas layout.
//!
//! Draws artifact frames, group headers, teleport markers, and routed
//! connection curves into a single SVG document. This is a debugging and
//! inspection surface: the live canvas renders previews externally, but the
//! geometry drawn here is exactly what the planners and router produced.

use indexmap::IndexMap;
use svg::{
    Document,
    node::element::{Group, Path, Rectangle, Text},
};

use atelier_core::{
    geometry::{Point, Rect, Size},
    identifier::ArtifactId,
};

use crate::{
    config::StyleConfig,
    layout::LayoutResult,
    route::{ConnectionEdge, EdgeKind},
};

/// Margin around the layout bounds in the exported document.
const CANVAS_MARGIN: f32 = 50.0;

const DEFAULT_FRAME_FILL: &str = "#ffffff";
const DEFAULT_FRAME_STROKE: &str = "#94a3b8";
const DEFAULT_EDGE_STROKE: &str = "#64748b";
const HEADER_FONT_SIZE: f32 = 14.0;
const LABEL_FONT_SIZE: f32 = 12.0;

/// Renders computed layouts into SVG documents.
pub struct SvgExporter<'a> {
    style: &'a StyleConfig,
}

impl<'a> SvgExporter<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Renders the layout and its routed edges to an SVG string.
    pub fn render(
        &self,
        layout: &LayoutResult,
        rects: &IndexMap<ArtifactId, Rect>,
        edges: &[ConnectionEdge],
    ) -> String {
        let bounds = self.layout_bounds(layout, rects);
        let mut document = Document::new().set(
            "viewBox",
            (
                bounds.min_x(),
                bounds.min_y(),
                bounds.width(),
                bounds.height(),
            ),
        );

        if let Some(background) = self.style.background_color() {
            document = document.add(
                Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", background),
            );
        }

        // Edges go under the frames they connect
        let mut edge_layer = Group::new().set("class", "connections");
        for edge in edges {
            edge_layer = edge_layer.add(self.render_edge(edge));
        }
        document = document.add(edge_layer);

        let mut frame_layer = Group::new().set("class", "frames");
        for (id, rect) in rects {
            frame_layer = frame_layer.add(self.render_frame(*id, *rect));
        }
        for teleport in layout.teleports() {
            frame_layer = frame_layer.add(self.render_teleport(teleport.rect(), teleport.target()));
        }
        document = document.add(frame_layer);

        for header in layout.headers() {
            document = document.add(
                Text::new(header.text())
                    .set("x", header.position().x())
                    .set("y", header.position().y())
                    .set("font-size", HEADER_FONT_SIZE)
                    .set("font-weight", "bold"),
            );
        }

        document.to_string()
    }

    fn render_frame(&self, id: ArtifactId, rect: Rect) -> Group {
        let fill = self.style.frame_fill().unwrap_or(DEFAULT_FRAME_FILL);
        Group::new()
            .add(
                Rectangle::new()
                    .set("x", rect.min_x())
                    .set("y", rect.min_y())
                    .set("width", rect.width())
                    .set("height", rect.height())
                    .set("fill", fill)
                    .set("stroke", DEFAULT_FRAME_STROKE),
            )
            .add(
                Text::new(id.name())
                    .set("x", rect.min_x() + 8.0)
                    .set("y", rect.min_y() + 18.0)
                    .set("font-size", LABEL_FONT_SIZE),
            )
    }

    fn render_teleport(&self, rect: Rect, target: ArtifactId) -> Group {
        Group::new()
            .add(
                Rectangle::new()
                    .set("x", rect.min_x())
                    .set("y", rect.min_y())
                    .set("width", rect.width())
                    .set("height", rect.height())
                    .set("fill", "none")
                    .set("stroke", DEFAULT_FRAME_STROKE)
                    .set("stroke-dasharray", "6 4"),
            )
            .add(
                Text::new(format!("-> {}", target.name()))
                    .set("x", rect.min_x() + 8.0)
                    .set("y", rect.min_y() + 18.0)
                    .set("font-size", LABEL_FONT_SIZE)
                    .set("fill", DEFAULT_FRAME_STROKE),
            )
    }

    fn render_edge(&self, edge: &ConnectionEdge) -> Path {
        let (c1, c2) = edge.control();
        let data = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            edge.from_point().x(),
            edge.from_point().y(),
            c1.x(),
            c1.y(),
            c2.x(),
            c2.y(),
            edge.to_point().x(),
            edge.to_point().y()
        );

        let stroke = self.style.edge_stroke().unwrap_or(DEFAULT_EDGE_STROKE);
        let mut path = Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", stroke);
        path = match edge.kind() {
            EdgeKind::Flow => path,
            EdgeKind::Hierarchy => path.set("stroke-dasharray", "6 4"),
            EdgeKind::Related => path.set("stroke-dasharray", "2 4"),
        };
        path
    }

    /// The bounds of everything drawn, with a margin.
    fn layout_bounds(&self, layout: &LayoutResult, rects: &IndexMap<ArtifactId, Rect>) -> Rect {
        rects
            .values()
            .copied()
            .chain(layout.teleports().iter().map(|t| t.rect()))
            .reduce(Rect::union)
            .map(|bounds| bounds.inflate(CANVAS_MARGIN))
            .unwrap_or_else(|| Rect::new(Point::new(0.0, 0.0), Size::new(100.0, 100.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutMode, Teleport};

    fn simple_layout() -> (LayoutResult, IndexMap<ArtifactId, Rect>) {
        let mut positions = IndexMap::new();
        positions.insert(ArtifactId::new("home"), Point::new(0.0, 0.0));
        positions.insert(ArtifactId::new("pricing"), Point::new(300.0, 0.0));

        let teleports = vec![Teleport::new(
            Rect::new(Point::new(600.0, 0.0), Size::new(200.0, 150.0)),
            ArtifactId::new("home"),
        )];
        let layout = LayoutResult::new(0, LayoutMode::Flow, positions, teleports, vec![]);

        let mut rects = IndexMap::new();
        rects.insert(
            ArtifactId::new("home"),
            Rect::new(Point::new(0.0, 0.0), Size::new(200.0, 150.0)),
        );
        rects.insert(
            ArtifactId::new("pricing"),
            Rect::new(Point::new(300.0, 0.0), Size::new(200.0, 150.0)),
        );
        (layout, rects)
    }

    #[test]
    fn test_render_contains_frames_and_teleport() {
        let (layout, rects) = simple_layout();
        let style = StyleConfig::default();
        let svg = SvgExporter::new(&style).render(&layout, &rects, &[]);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("home"));
        assert!(svg.contains("pricing"));
        // Teleport marker renders dashed with a reference label
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("-&gt; home") || svg.contains("-> home"));
    }

    #[test]
    fn test_render_empty_layout_is_valid_document() {
        let layout = LayoutResult::default();
        let rects = IndexMap::new();
        let style = StyleConfig::default();
        let svg = SvgExporter::new(&style).render(&layout, &rects, &[]);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox"));
    }

    #[test]
    fn test_background_color_applied() {
        let (layout, rects) = simple_layout();
        let style: StyleConfig =
            serde_json::from_str(r##"{ "background_color": "#0f172a" }"##).unwrap();
        let svg = SvgExporter::new(&style).render(&layout, &rects, &[]);
        assert!(svg.contains("#0f172a"));
    }
}
