//! Configuration for diagram editing

use crate::geometry::Point;

use super::types::{DEFAULT_LINK_LABEL_OFFSET, DEFAULT_NODE_LABEL_OFFSET};

/// Configuration options for editing operations
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    /// Grid pitch used when snapping placed or moved nodes
    pub snap_size: f64,

    /// Whether node placement and moves snap to the grid
    pub snap_to_grid: bool,

    /// Label offset given to new nodes
    pub node_label_offset: (f64, f64),

    /// Label offset given to new links
    pub link_label_offset: (f64, f64),

    /// Displacement applied to pasted nodes
    pub paste_offset: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            snap_size: 20.0,
            snap_to_grid: false,
            node_label_offset: DEFAULT_NODE_LABEL_OFFSET,
            link_label_offset: DEFAULT_LINK_LABEL_OFFSET,
            paste_offset: 40.0,
        }
    }
}

impl DiagramConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid pitch
    pub fn with_snap_size(mut self, size: f64) -> Self {
        self.snap_size = size;
        self
    }

    /// Enable or disable grid snapping
    pub fn with_snap_to_grid(mut self, snap: bool) -> Self {
        self.snap_to_grid = snap;
        self
    }

    /// Set the paste displacement
    pub fn with_paste_offset(mut self, offset: f64) -> Self {
        self.paste_offset = offset;
        self
    }

    /// Apply grid snapping to a position when enabled
    pub fn place(&self, point: Point) -> Point {
        if self.snap_to_grid {
            Point::new(snap(point.x, self.snap_size), snap(point.y, self.snap_size))
        } else {
            point
        }
    }
}

/// Round a coordinate to the nearest multiple of `size`
pub fn snap(value: f64, size: f64) -> f64 {
    if size <= 0.0 {
        return value;
    }
    (value / size).round() * size
}
