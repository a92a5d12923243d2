//! Error types for diagram editing operations

use thiserror::Error;

use crate::catalog::{LiaisonType, LiaisonView};

/// Errors returned by [`Diagram`](super::Diagram) mutators
#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    /// Reference to a node id that does not exist
    #[error("unknown node '{id}'")]
    UnknownNode { id: String },

    /// Reference to a link id that does not exist
    #[error("unknown link '{id}'")]
    UnknownLink { id: String },

    /// Reference to a solide id that does not exist
    #[error("unknown solide '{id}'")]
    UnknownSolide { id: String },

    /// The ground body is permanent
    #[error("the ground solide cannot be deleted")]
    GroundSolide,

    /// View not available for the joint symbol
    #[error("liaison '{liaison}' has no view {}", .view.number())]
    UnsupportedView {
        liaison: LiaisonType,
        view: LiaisonView,
    },

    /// Pinned anchor index outside the symbol's anchor list
    #[error("anchor {index} does not exist on node '{node}' ({count} anchors)")]
    InvalidAnchor {
        node: String,
        index: usize,
        count: usize,
    },

    /// A link needs two distinct joints
    #[error("cannot link node '{id}' to itself")]
    SelfLink { id: String },
}

impl DiagramError {
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    pub fn unknown_link(id: impl Into<String>) -> Self {
        Self::UnknownLink { id: id.into() }
    }

    pub fn unknown_solide(id: impl Into<String>) -> Self {
        Self::UnknownSolide { id: id.into() }
    }

    pub fn invalid_anchor(node: impl Into<String>, index: usize, count: usize) -> Self {
        Self::InvalidAnchor {
            node: node.into(),
            index,
            count,
        }
    }
}
