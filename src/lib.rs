//! KineSketch - kinematic diagram model, analysis and rendering
//!
//! This library loads `.kinesketch` kinematic diagrams (joints, rigid bodies
//! and the links drawn between them), routes every link onto the joint
//! symbols' attachment points, counts the mechanism's mobility and renders a
//! schematic SVG overview.
//!
//! # Example
//!
//! ```rust
//! use kinesketch::{analyze, MobilityStatus};
//!
//! let source = r##"{
//!     "version": "1.1",
//!     "nodes": [
//!         { "id": "n1", "type": "pivot", "x": 0, "y": 0 },
//!         { "id": "n2", "type": "pivot", "x": 100, "y": 0 }
//!     ],
//!     "links": [
//!         { "id": "l3", "fromNodeId": "n1", "toNodeId": "n2", "solideId": "s0" },
//!         { "id": "l4", "fromNodeId": "n2", "toNodeId": "n1", "solideId": "s1" }
//!     ],
//!     "solides": [
//!         { "id": "s0", "name": "S0", "color": "#6b7280", "isBati": true },
//!         { "id": "s1", "name": "S1", "color": "#2563eb" }
//!     ]
//! }"##;
//!
//! let report = analyze(source).unwrap().unwrap();
//! assert_eq!(report.m_2d, -1);
//! assert_eq!(report.status, MobilityStatus::Hyperstatic { degree: 1 });
//! ```

pub mod analysis;
pub mod anchor;
pub mod catalog;
pub mod diagram;
pub mod document;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod renderer;
pub mod routing;

pub use analysis::{
    analyze_diagram, analyze_mobility, liaison_graph, liaison_table, MobilityReport, MobilityStatus,
};
pub use anchor::{get_anchors, map_sides, resolve_anchor, AnchorPoint, Side, SideMapping};
pub use catalog::{LiaisonType, LiaisonView};
pub use diagram::{Diagram, DiagramConfig, DiagramError, DiagramNode, Link, Solide};
pub use document::{Document, DocumentError};
pub use error::KinesketchError;
pub use geometry::{BoundingBox, Point};
pub use palette::{Palette, PaletteError, PaletteInfo};
pub use renderer::{render_svg, render_svg_with_palette, SvgConfig};
pub use routing::{route_link, route_links, RoutedLink};

/// Configuration for the complete load and render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Editing configuration given to the loaded diagram
    pub diagram: DiagramConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Palette for solide and ink colors
    pub palette: Palette,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the editing configuration
    pub fn with_diagram(mut self, config: DiagramConfig) -> Self {
        self.diagram = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

/// Load a document with the pipeline configuration applied
pub fn load(source: &str, config: &RenderConfig) -> error::Result<Document> {
    let mut document = document::load_str(source, &config.palette)?;
    document.diagram = document.diagram.with_config(config.diagram.clone());
    Ok(document)
}

/// Mobility report of a `.kinesketch` document
///
/// `Ok(None)` means the mechanism is too small to count (one body, or no
/// joint shared by two bodies).
pub fn analyze(source: &str) -> error::Result<Option<MobilityReport>> {
    let document = load(source, &RenderConfig::default())?;
    Ok(analyze_diagram(&document.diagram))
}

/// Render a `.kinesketch` document to SVG with default configuration
///
/// # Example
///
/// ```rust
/// let svg = kinesketch::render(r#"{
///     "version": "1.1",
///     "nodes": [{ "id": "n1", "type": "rotule", "x": 10, "y": 10 }]
/// }"#).unwrap();
///
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains(r#"id="n1""#));
/// ```
pub fn render(source: &str) -> error::Result<String> {
    render_with_config(source, &RenderConfig::default())
}

/// Render a `.kinesketch` document to SVG with custom configuration
pub fn render_with_config(source: &str, config: &RenderConfig) -> error::Result<String> {
    let document = load(source, config)?;
    Ok(render_svg_with_palette(
        &document.diagram,
        &config.svg,
        &config.palette,
    ))
}
