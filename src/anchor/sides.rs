//! Which rigid body sits on which half of each joint symbol
//!
//! The mapping is folded over the links in creation order. Pinned endpoints
//! claim the side of their anchor; automatic endpoints fill side A, then side
//! B. A side never changes once assigned and only two bodies are tracked.

use std::collections::HashMap;

use serde::Serialize;

use crate::diagram::{Diagram, DiagramNode, Link};

use super::table::{get_anchors, Side};

/// Solide ids assigned to the two halves of a joint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SideMapping {
    pub side_a: Option<String>,
    pub side_b: Option<String>,
}

impl SideMapping {
    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::A => self.side_a.as_deref(),
            Side::B => self.side_b.as_deref(),
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }

    /// Both halves have a body
    pub fn is_complete(&self) -> bool {
        self.side_a.is_some() && self.side_b.is_some()
    }

    /// Side holding the given solide, if any
    pub fn side_of(&self, solide_id: &str) -> Option<Side> {
        if self.side_a.as_deref() == Some(solide_id) {
            Some(Side::A)
        } else if self.side_b.as_deref() == Some(solide_id) {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Place a solide on an explicit side
    ///
    /// No-op when the side is taken or the solide already sits opposite.
    fn claim(&mut self, side: Side, solide_id: &str) {
        if self.get(side).is_some() || self.get(side.other()) == Some(solide_id) {
            return;
        }
        *self.slot_mut(side) = Some(solide_id.to_string());
    }

    /// Place a solide on the first free side, unless already present
    fn first_seen(&mut self, solide_id: &str) {
        if self.side_of(solide_id).is_some() {
            return;
        }
        if self.side_a.is_none() {
            self.side_a = Some(solide_id.to_string());
        } else if self.side_b.is_none() {
            self.side_b = Some(solide_id.to_string());
        }
    }
}

/// Compute the side mapping of one node from the links touching it
pub fn map_sides(node: &DiagramNode, links: &[Link]) -> SideMapping {
    let anchors = get_anchors(node.liaison_type, node.view);

    links
        .iter()
        .flat_map(|link| {
            link.endpoints_at(&node.id)
                .map(move |(_, pinned)| (link.solide_id.as_str(), pinned))
        })
        .fold(SideMapping::default(), |mut mapping, (solide_id, pinned)| {
            match pinned.and_then(|index| anchors.get(index)) {
                Some(anchor) => mapping.claim(anchor.side, solide_id),
                None => mapping.first_seen(solide_id),
            }
            mapping
        })
}

/// Side mapping for every node of the diagram, keyed by node id
pub fn map_all_sides(diagram: &Diagram) -> HashMap<String, SideMapping> {
    diagram
        .nodes()
        .iter()
        .map(|node| (node.id.clone(), map_sides(node, diagram.links())))
        .collect()
}
