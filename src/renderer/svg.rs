//! SVG generation from a diagram and its routed links
//!
//! Output is layered: link segments first, joint markers over them, labels on
//! top. Colors come from the solides, ink from palette CSS variables.

use std::collections::HashMap;

use crate::anchor::{map_all_sides, world_anchors, Side, SideMapping};
use crate::diagram::{Diagram, DiagramNode, GROUND_SOLIDE_ID};
use crate::geometry::{BoundingBox, Point};
use crate::palette::Palette;
use crate::routing::{route_links, RoutedLink};

use super::SvgConfig;

/// Accumulates SVG layers, then assembles the document
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    links: Vec<String>,
    joints: Vec<String>,
    labels: Vec<String>,
    depth: usize,
}

impl SvgBuilder {
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: Vec::new(),
            links: Vec::new(),
            joints: Vec::new(),
            labels: Vec::new(),
            depth: 1,
        }
    }

    /// Palette tokens as CSS custom properties, plus the label and link rules
    pub fn add_palette(&mut self, palette: &Palette) {
        let nl = self.newline();
        let mut css = format!(":root {{{nl}");
        for (token, value) in &palette.colors {
            css.push_str(&format!("    --{}: {};{nl}", token, value));
        }
        css.push_str(&format!("  }}{nl}"));
        css.push_str(&format!(
            "  .{} {{ font: 12px sans-serif; fill: var(--label); }}{nl}",
            self.config.class("label")
        ));
        css.push_str(&format!(
            "  .{} {{ stroke-width: {}; stroke-linecap: round; }}",
            self.config.class("link"),
            num(self.config.link_width)
        ));
        self.styles.push(css);
    }

    fn indent(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.depth)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &'static str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// A link segment stroked with its solide color
    pub fn add_link(&mut self, id: &str, solide_id: &str, from: Point, to: Point, color: &str) {
        let classes = format!(
            "{} {}",
            self.config.class("link"),
            self.config.class(&format!("solide-{}", solide_id))
        );
        self.links.push(format!(
            r#"{}<line id="{}" class="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
            self.indent(),
            escape_xml(id),
            escape_xml(&classes),
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            escape_xml(color),
        ));
    }

    /// A joint marker: a disc split in two halves, one per side color.
    ///
    /// Side A is the upper half in the symbol's local frame; the group is
    /// rotated with the node.
    pub fn add_joint_marker(
        &mut self,
        id: &str,
        center: Point,
        rotation: f64,
        color_a: &str,
        color_b: &str,
    ) {
        let r = num(self.config.marker_radius);
        let (cx, cy) = (num(center.x), num(center.y));
        let left = num(center.x - self.config.marker_radius);
        let right = num(center.x + self.config.marker_radius);
        let transform = if rotation.abs() < f64::EPSILON {
            String::new()
        } else {
            format!(r#" transform="rotate({} {} {})""#, num(rotation), cx, cy)
        };

        let joint_class = self.config.class("joint");
        self.open_group(id, &joint_class, &transform);
        for (side, from, to, color) in [("side-a", &left, &right, color_a), ("side-b", &right, &left, color_b)] {
            self.joints.push(format!(
                r#"{}<path class="{}" d="M{from} {cy} A{r} {r} 0 0 1 {to} {cy} Z" fill="{}"/>"#,
                self.indent(),
                self.config.class(side),
                escape_xml(color),
            ));
        }
        self.close_group();
    }

    /// A small dot on an anchor point, classed by side
    pub fn add_anchor_dot(&mut self, point: Point, side: Side) {
        let side_class = match side {
            Side::A => "anchor-a",
            Side::B => "anchor-b",
        };
        self.joints.push(format!(
            r#"{}<circle class="{} {}" cx="{}" cy="{}" r="2" fill="var(--anchor)"/>"#,
            self.indent(),
            self.config.class("anchor"),
            self.config.class(side_class),
            num(point.x),
            num(point.y),
        ));
    }

    pub fn add_label(&mut self, text: &str, at: Point) {
        self.labels.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="start">{}</text>"#,
            self.indent(),
            self.config.class("label"),
            num(at.x),
            num(at.y),
            escape_xml(text)
        ));
    }

    fn open_group(&mut self, id: &str, class: &str, attrs: &str) {
        self.joints.push(format!(
            r#"{}<g id="{}" class="{}"{}>"#,
            self.indent(),
            escape_xml(id),
            class,
            attrs
        ));
        self.depth += 1;
    }

    fn close_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.joints.push(format!("{}</g>", self.indent()));
    }

    /// Assemble the document around `extent` plus the configured padding
    pub fn build(self, extent: BoundingBox) -> String {
        let view = extent.inflate(self.config.padding);
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            num(view.x),
            num(view.y),
            num(view.width),
            num(view.height)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for line in self.links.iter().chain(&self.joints).chain(&self.labels) {
            svg.push_str(line);
            svg.push_str(nl);
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Render a diagram with the default palette
pub fn render_svg(diagram: &Diagram, config: &SvgConfig) -> String {
    render_svg_with_palette(diagram, config, &Palette::default())
}

/// Render a diagram as a schematic overview
pub fn render_svg_with_palette(diagram: &Diagram, config: &SvgConfig, palette: &Palette) -> String {
    let routed = route_links(diagram);
    let sides = map_all_sides(diagram);
    let colors: HashMap<&str, &str> = diagram
        .solides()
        .iter()
        .map(|s| (s.id.as_str(), s.color.as_str()))
        .collect();
    let link_default = palette.resolve_or_default("link-default");
    let ground_color = colors
        .get(GROUND_SOLIDE_ID)
        .copied()
        .unwrap_or_else(|| palette.ground_color());

    let mut builder = SvgBuilder::new(config.clone());
    builder.add_palette(palette);

    for routed_link in &routed {
        let color = colors
            .get(routed_link.solide_id.as_str())
            .copied()
            .unwrap_or(link_default.as_str());
        builder.add_link(
            &routed_link.link_id,
            &routed_link.solide_id,
            routed_link.from,
            routed_link.to,
            color,
        );

        if let Some(link) = diagram.link(&routed_link.link_id).filter(|_| config.show_labels) {
            if !link.label.is_empty() {
                let at = routed_link.midpoint() + Point::new(link.label_offset_x, link.label_offset_y);
                builder.add_label(&link.label, at);
            }
        }
    }

    let no_sides = SideMapping::default();
    for node in diagram.nodes() {
        let mapping = sides.get(&node.id).unwrap_or(&no_sides);
        let side_color = |side: Side| {
            mapping
                .get(side)
                .and_then(|id| colors.get(id).copied())
                .unwrap_or(ground_color)
        };
        builder.add_joint_marker(
            &node.id,
            node.position(),
            node.rotation,
            side_color(Side::A),
            side_color(Side::B),
        );

        if config.show_anchors {
            for (anchor, world) in world_anchors(node) {
                builder.add_anchor_dot(world, anchor.side);
            }
        }

        if config.show_labels && !node.label.is_empty() {
            let at = node.position() + Point::new(node.label_offset_x, node.label_offset_y);
            builder.add_label(&node.label, at);
        }
    }

    builder.build(diagram_bounds(diagram.nodes(), &routed, config.marker_radius))
}

/// Extent of joint markers and routed links
fn diagram_bounds(nodes: &[DiagramNode], routed: &[RoutedLink], marker_radius: f64) -> BoundingBox {
    let marker_corners = nodes.iter().flat_map(|n| {
        let p = n.position();
        [
            Point::new(p.x - marker_radius, p.y - marker_radius),
            Point::new(p.x + marker_radius, p.y + marker_radius),
        ]
    });
    let endpoints = routed.iter().flat_map(|r| [r.from, r.to]);

    BoundingBox::from_points(marker_corners.chain(endpoints)).unwrap_or_else(BoundingBox::zero)
}

/// Format a coordinate with at most two decimals
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // adding zero turns -0 into 0
    format!("{}", rounded + 0.0)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LiaisonType;

    fn crank() -> Diagram {
        let palette = Palette::default();
        let mut diagram = Diagram::new();
        let a = diagram.add_node(LiaisonType::Pivot, 0.0, 0.0);
        let b = diagram.add_node(LiaisonType::Pivot, 100.0, 0.0);
        let c = diagram.add_node(LiaisonType::Pivot, 100.0, 100.0);
        diagram.add_link(&a, &b).unwrap();
        diagram.add_solide(&palette);
        diagram.add_link(&b, &c).unwrap();
        diagram.set_node_label(&b, "B").unwrap();
        diagram
    }

    #[test]
    fn test_num() {
        assert_eq!(num(34.0), "34");
        assert_eq!(num(0.125), "0.13");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(2.0e-15), "0");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_render_links_with_solide_colors() {
        let svg = render_svg(&crank(), &SvgConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"id="l4""#));
        assert!(svg.contains("ks-solide-s0"));
        assert!(svg.contains(r##"stroke="#2563eb""##));
        // routed between facing flanges
        assert!(svg.contains(r#"x1="34" y1="0" x2="66" y2="0""#));
    }

    #[test]
    fn test_render_two_tone_marker() {
        let svg = render_svg(&crank(), &SvgConfig::default());
        // n2 joins the ground (side A, first seen) and s1 (side B)
        let start = svg.find(r#"<g id="n2""#).unwrap();
        let group = &svg[start..];
        let side_a = group.find("ks-side-a").unwrap();
        let side_b = group.find("ks-side-b").unwrap();
        assert!(group[side_a..].starts_with(r##"ks-side-a" d="M92 0 A8 8 0 0 1 108 0 Z" fill="#6b7280""##));
        assert!(group[side_b..].contains(r##"fill="#2563eb""##));
    }

    #[test]
    fn test_render_labels_and_anchors() {
        let svg = render_svg(&crank(), &SvgConfig::default().with_anchors(true));
        assert!(svg.contains(">B</text>"));
        assert!(svg.contains(">L01</text>"));
        assert_eq!(svg.matches("ks-anchor ").count(), 12);
    }

    #[test]
    fn test_render_rotation_transform() {
        let mut diagram = Diagram::new();
        let a = diagram.add_node(LiaisonType::Glissiere, 10.0, 20.0);
        diagram.rotate_node(&a, 90.0).unwrap();
        let svg = render_svg(&diagram, &SvgConfig::default());
        assert!(svg.contains(r#"transform="rotate(90 10 20)""#));
    }

    #[test]
    fn test_empty_diagram_viewbox() {
        let svg = render_svg(&Diagram::new(), &SvgConfig::default().with_standalone(false));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="-40 -40 80 80""#));
    }

    #[test]
    fn test_labels_can_be_hidden() {
        let svg = render_svg(&crank(), &SvgConfig::default().with_labels(false));
        assert!(!svg.contains("<text"));
        assert!(svg.contains("stroke-width: 3;"));
    }

    #[test]
    fn test_without_prefix() {
        let svg = render_svg(&crank(), &SvgConfig::default().without_class_prefix());
        assert!(svg.contains(r#"class="link solide-s0""#));
        assert!(!svg.contains("ks-"));
    }
}
