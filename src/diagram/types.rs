//! Core diagram records: joints, rigid bodies, links and angle annotations
//!
//! Field names serialize in camelCase so the records double as the
//! `.kinesketch` document schema.

use serde::{Deserialize, Serialize};

use crate::catalog::{LiaisonType, LiaisonView};
use crate::geometry::Point;

/// Reserved id of the ground body ("bâti")
pub const GROUND_SOLIDE_ID: &str = "s0";

/// Default node label offset relative to the node origin
pub const DEFAULT_NODE_LABEL_OFFSET: (f64, f64) = (20.0, -20.0);

/// Default link label offset relative to the link midpoint
pub const DEFAULT_LINK_LABEL_OFFSET: (f64, f64) = (8.0, -18.0);

fn default_node_label_offset_x() -> f64 {
    DEFAULT_NODE_LABEL_OFFSET.0
}

fn default_node_label_offset_y() -> f64 {
    DEFAULT_NODE_LABEL_OFFSET.1
}

fn default_link_label_offset_x() -> f64 {
    DEFAULT_LINK_LABEL_OFFSET.0
}

fn default_link_label_offset_y() -> f64 {
    DEFAULT_LINK_LABEL_OFFSET.1
}

fn default_solide_id() -> String {
    GROUND_SOLIDE_ID.to_string()
}

/// A placed joint symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub id: String,
    #[serde(rename = "type")]
    pub liaison_type: LiaisonType,
    #[serde(default)]
    pub view: LiaisonView,
    pub x: f64,
    pub y: f64,
    /// Degrees in `[0, 360)`
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_node_label_offset_x")]
    pub label_offset_x: f64,
    #[serde(default = "default_node_label_offset_y")]
    pub label_offset_y: f64,
}

impl DiagramNode {
    pub fn new(id: impl Into<String>, liaison_type: LiaisonType, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            liaison_type,
            view: LiaisonView::First,
            x,
            y,
            rotation: 0.0,
            label: String::new(),
            label_offset_x: DEFAULT_NODE_LABEL_OFFSET.0,
            label_offset_y: DEFAULT_NODE_LABEL_OFFSET.1,
        }
    }

    pub fn with_view(mut self, view: LiaisonView) -> Self {
        self.view = view;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Label text, or the id when the label is empty
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// A rigid body group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solide {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub is_bati: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_frame: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_label: Option<String>,
}

impl Solide {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            is_bati: false,
            show_frame: None,
            frame_x: None,
            frame_y: None,
            frame_rotation: None,
            frame_label: None,
        }
    }

    /// The ground body with the given color
    pub fn ground(color: impl Into<String>) -> Self {
        Self {
            is_bati: true,
            ..Self::new(GROUND_SOLIDE_ID, "S0", color)
        }
    }

    pub fn is_ground(&self) -> bool {
        self.id == GROUND_SOLIDE_ID
    }
}

/// A segment of a rigid body drawn between two joints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    #[serde(default = "default_solide_id")]
    pub solide_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_link_label_offset_x")]
    pub label_offset_x: f64,
    #[serde(default = "default_link_label_offset_y")]
    pub label_offset_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_anchor_idx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_anchor_idx: Option<usize>,
}

/// Which end of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEnd {
    From,
    To,
}

impl Link {
    pub fn new(
        id: impl Into<String>,
        from_node_id: impl Into<String>,
        to_node_id: impl Into<String>,
        solide_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_node_id: from_node_id.into(),
            to_node_id: to_node_id.into(),
            solide_id: solide_id.into(),
            label: String::new(),
            label_offset_x: DEFAULT_LINK_LABEL_OFFSET.0,
            label_offset_y: DEFAULT_LINK_LABEL_OFFSET.1,
            from_anchor_idx: None,
            to_anchor_idx: None,
        }
    }

    pub fn with_anchors(mut self, from: Option<usize>, to: Option<usize>) -> Self {
        self.from_anchor_idx = from;
        self.to_anchor_idx = to;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Whether either endpoint is the given node
    pub fn touches(&self, node_id: &str) -> bool {
        self.from_node_id == node_id || self.to_node_id == node_id
    }

    /// Pinned anchor indices of every endpoint attached to `node_id`,
    /// from endpoint first
    pub fn endpoints_at<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = (LinkEnd, Option<usize>)> + 'a {
        let from = (self.from_node_id == node_id).then_some((LinkEnd::From, self.from_anchor_idx));
        let to = (self.to_node_id == node_id).then_some((LinkEnd::To, self.to_anchor_idx));
        from.into_iter().chain(to)
    }

    pub fn node_id(&self, end: LinkEnd) -> &str {
        match end {
            LinkEnd::From => &self.from_node_id,
            LinkEnd::To => &self.to_node_id,
        }
    }

    pub fn anchor_idx(&self, end: LinkEnd) -> Option<usize> {
        match end {
            LinkEnd::From => self.from_anchor_idx,
            LinkEnd::To => self.to_anchor_idx,
        }
    }

    /// Label text, or the id when the label is empty
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// Angle annotation drawn between two rigid bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleArc {
    pub id: String,
    pub from_solide_id: String,
    pub to_solide_id: String,
    #[serde(default)]
    pub label: String,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label_offset_x: f64,
    #[serde(default)]
    pub label_offset_y: f64,
}
