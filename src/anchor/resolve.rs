//! Anchor selection for link endpoints
//!
//! A link endpoint either uses the anchor pinned by the user or the anchor
//! closest to a target point, restricted to the half of the symbol that
//! belongs to the link's solide when that half is known.

use crate::diagram::DiagramNode;
use crate::geometry::{Point, RotationTransform};

use super::sides::SideMapping;
use super::table::{get_anchors, AnchorPoint};

/// World position of an anchor on a placed node
pub fn anchor_to_world(node: &DiagramNode, anchor: &AnchorPoint) -> Point {
    RotationTransform::new(node.rotation, node.position()).place_offset(anchor.offset())
}

/// World position of the anchor at `index`, or None when out of range
pub fn anchor_world_by_index(node: &DiagramNode, index: usize) -> Option<Point> {
    get_anchors(node.liaison_type, node.view)
        .get(index)
        .map(|anchor| anchor_to_world(node, anchor))
}

/// World positions of every anchor on a node, in table order
pub fn world_anchors(node: &DiagramNode) -> Vec<(AnchorPoint, Point)> {
    get_anchors(node.liaison_type, node.view)
        .iter()
        .map(|anchor| (*anchor, anchor_to_world(node, anchor)))
        .collect()
}

/// Pick the attachment point for one link endpoint.
///
/// A valid `forced_index` wins outright. Otherwise the candidates are the
/// anchors on the side holding `link_solide_id` (all anchors when the mapping
/// is incomplete or does not mention the solide), and the one nearest to
/// `target` is returned. Nodes without anchors resolve to their origin.
pub fn resolve_anchor(
    node: &DiagramNode,
    target: Point,
    link_solide_id: &str,
    mapping: &SideMapping,
    forced_index: Option<usize>,
) -> Point {
    if let Some(point) = forced_index.and_then(|index| anchor_world_by_index(node, index)) {
        return point;
    }

    let anchors = get_anchors(node.liaison_type, node.view);
    if anchors.is_empty() {
        return node.position();
    }

    let side = mapping.side_of(link_solide_id).filter(|_| mapping.is_complete());
    let on_side: Vec<&AnchorPoint> = match side {
        Some(side) => anchors.iter().filter(|a| a.side == side).collect(),
        None => Vec::new(),
    };
    let candidates: Vec<&AnchorPoint> = if on_side.is_empty() {
        anchors.iter().collect()
    } else {
        on_side
    };

    let transform = RotationTransform::new(node.rotation, node.position());
    let mut best = node.position();
    let mut best_distance = f64::INFINITY;
    for anchor in candidates {
        let world = transform.place_offset(anchor.offset());
        let distance = world.distance_squared(target);
        // strict comparison keeps the first anchor on ties
        if distance < best_distance {
            best_distance = distance;
            best = world;
        }
    }
    best
}
