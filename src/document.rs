//! `.kinesketch` document format
//!
//! A document is a pretty-printed JSON object:
//!
//! ```json
//! {
//!   "version": "1.1",
//!   "name": "Four-bar linkage",
//!   "nodes": [{ "id": "n1", "type": "pivot", "view": 1, "x": 0, "y": 0, ... }],
//!   "links": [{ "id": "l5", "fromNodeId": "n1", "toNodeId": "n2", "solideId": "s0", ... }],
//!   "solides": [{ "id": "s0", "name": "S0", "color": "#6b7280", "isBati": true }],
//!   "canvas": { "x": 0, "y": 0, "scale": 1 },
//!   "metadata": { "createdAt": "...", "updatedAt": "..." }
//! }
//! ```
//!
//! Older documents may omit label offsets, link solides, views and solides
//! entirely; loading fills in the same defaults the editor always used.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{LiaisonType, LiaisonView};
use crate::diagram::{AngleArc, Diagram, DiagramNode, Link, Solide, GROUND_SOLIDE_ID};
use crate::geometry::normalize_degrees;
use crate::palette::Palette;

/// Format version written by this crate
pub const FORMAT_VERSION: &str = "1.1";

/// Document name used when none is given
pub const DEFAULT_DOCUMENT_NAME: &str = "Schema cinématique";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document: missing '{0}'")]
    MissingField(&'static str),

    #[error("node '{node}' has unsupported liaison type '{liaison}'")]
    UnknownLiaison { node: String, liaison: String },

    #[error("link '{link}' references missing node '{node}'")]
    DanglingLink { link: String, node: String },
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Viewport saved alongside the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// On-disk shape of a `.kinesketch` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KineSketchFile {
    pub version: String,
    #[serde(default)]
    pub name: String,
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub solides: Vec<Solide>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub angle_arcs: Vec<AngleArc>,
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A loaded document: the diagram plus what the file carries around it
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub canvas: Canvas,
    pub metadata: Metadata,
    pub diagram: Diagram,
}

impl Document {
    pub fn new(name: impl Into<String>, diagram: Diagram) -> Self {
        Self {
            name: name.into(),
            canvas: Canvas::default(),
            metadata: Metadata::default(),
            diagram,
        }
    }

    /// Snapshot in file form
    pub fn to_file(&self) -> KineSketchFile {
        KineSketchFile {
            version: FORMAT_VERSION.to_string(),
            name: self.name.clone(),
            nodes: self.diagram.nodes().to_vec(),
            links: self.diagram.links().to_vec(),
            solides: self.diagram.solides().to_vec(),
            angle_arcs: self.diagram.angle_arcs().to_vec(),
            canvas: self.canvas.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Parse and validate the raw file structure
pub fn parse(content: &str) -> Result<KineSketchFile> {
    let value: Value = serde_json::from_str(content)?;

    if value.get("version").map_or(true, Value::is_null) {
        return Err(DocumentError::MissingField("version"));
    }
    let Some(nodes) = value.get("nodes").and_then(Value::as_array) else {
        return Err(DocumentError::MissingField("nodes"));
    };

    // report unknown joint kinds by name rather than as a serde variant error
    for node in nodes {
        let Some(liaison) = node.get("type").and_then(Value::as_str) else {
            continue;
        };
        if liaison.parse::<LiaisonType>().is_err() {
            let id = node.get("id").and_then(Value::as_str).unwrap_or("?");
            return Err(DocumentError::UnknownLiaison {
                node: id.to_string(),
                liaison: liaison.to_string(),
            });
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Turn a parsed file into an editable document, applying load defaults
pub fn from_file(mut file: KineSketchFile, palette: &Palette) -> Result<Document> {
    for node in &mut file.nodes {
        node.rotation = normalize_degrees(node.rotation);
        if !node.liaison_type.supports_view(node.view) {
            warn!(
                node = %node.id,
                liaison = %node.liaison_type,
                "view {} not available, using view 1",
                node.view.number()
            );
            node.view = LiaisonView::First;
        }
    }

    for link in &mut file.links {
        if link.solide_id.is_empty() {
            link.solide_id = GROUND_SOLIDE_ID.to_string();
        }
        for node_id in [&link.from_node_id, &link.to_node_id] {
            if !file.nodes.iter().any(|n| &n.id == node_id) {
                return Err(DocumentError::DanglingLink {
                    link: link.id.clone(),
                    node: node_id.clone(),
                });
            }
        }
    }

    if file.version != FORMAT_VERSION {
        debug!(version = %file.version, "loading document written by another format version");
    }

    let name = if file.name.is_empty() {
        DEFAULT_DOCUMENT_NAME.to_string()
    } else {
        file.name
    };
    let diagram = Diagram::from_parts(file.nodes, file.links, file.solides, file.angle_arcs, palette);

    info!(
        name = %name,
        nodes = diagram.nodes().len(),
        links = diagram.links().len(),
        solides = diagram.solides().len(),
        "loaded document"
    );

    Ok(Document {
        name,
        canvas: file.canvas,
        metadata: file.metadata,
        diagram,
    })
}

/// Load a document from JSON text
pub fn load_str(content: &str, palette: &Palette) -> Result<Document> {
    from_file(parse(content)?, palette)
}

/// Load a document from disk
pub fn load_file(path: &Path, palette: &Palette) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    load_str(&content, palette)
}

/// Serialize a document as pretty-printed JSON
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(&document.to_file())?)
}

/// Write a document to disk
pub fn save_file(document: &Document, path: &Path) -> Result<()> {
    std::fs::write(path, to_json(document)?)?;
    info!(path = %path.display(), "saved document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"{
        "version": "1.0",
        "nodes": [
            { "id": "n1", "type": "pivot", "x": 0, "y": 0, "rotation": 0, "label": "" },
            { "id": "n2", "type": "rotule", "view": 2, "x": 100, "y": 0, "rotation": 0, "label": "B" }
        ],
        "links": [
            { "id": "l3", "fromNodeId": "n1", "toNodeId": "n2", "solideId": "", "label": "" }
        ]
    }"#;

    #[test]
    fn test_legacy_defaults() {
        let document = load_str(LEGACY, &Palette::default()).unwrap();
        let diagram = &document.diagram;

        assert_eq!(document.name, DEFAULT_DOCUMENT_NAME);
        assert_eq!(diagram.solides().len(), 1);
        assert!(diagram.solides()[0].is_bati);
        assert_eq!(diagram.links()[0].solide_id, GROUND_SOLIDE_ID);
        assert_eq!(diagram.links()[0].label_offset_x, 8.0);
        assert_eq!(diagram.nodes()[0].label_offset_y, -20.0);
        // rotule has a single view
        assert_eq!(diagram.nodes()[1].view, LiaisonView::First);
        assert_eq!(document.canvas, Canvas::default());
    }

    #[test]
    fn test_missing_version() {
        let err = parse(r#"{ "nodes": [] }"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField("version")));
    }

    #[test]
    fn test_missing_nodes() {
        let err = parse(r#"{ "version": "1.1" }"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField("nodes")));
    }

    #[test]
    fn test_unknown_liaison() {
        let content = r#"{ "version": "1.1", "nodes": [{ "id": "n1", "type": "cardan", "x": 0, "y": 0 }] }"#;
        match parse(content).unwrap_err() {
            DocumentError::UnknownLiaison { node, liaison } => {
                assert_eq!(node, "n1");
                assert_eq!(liaison, "cardan");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_dangling_link() {
        let content = r#"{
            "version": "1.1",
            "nodes": [{ "id": "n1", "type": "pivot", "x": 0, "y": 0 }],
            "links": [{ "id": "l2", "fromNodeId": "n1", "toNodeId": "n7" }]
        }"#;
        let err = load_str(content, &Palette::default()).unwrap_err();
        assert_eq!(err.to_string(), "link 'l2' references missing node 'n7'");
    }

    #[test]
    fn test_malformed_json() {
        let err = parse("{ nope").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_to_json_shape() {
        let mut diagram = Diagram::new();
        let a = diagram.add_node(LiaisonType::Pivot, 0.0, 0.0);
        let b = diagram.add_node(LiaisonType::Glissiere, 50.0, 0.0);
        diagram.add_link(&a, &b).unwrap();
        let document = Document::new("demo", diagram);

        let json: Value = serde_json::from_str(&to_json(&document).unwrap()).unwrap();
        assert_eq!(json["version"], FORMAT_VERSION);
        assert_eq!(json["links"][0]["fromNodeId"], "n1");
        assert_eq!(json["solides"][0]["isBati"], true);
        assert_eq!(json["canvas"]["scale"], 1.0);
        assert!(json.get("angleArcs").is_none());
    }
}
