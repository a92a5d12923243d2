//! Link endpoint routing between joint anchors
//!
//! Each endpoint first aims at the other joint's origin, then at the point the
//! other endpoint picked in that first pass. Two passes are enough for the
//! ends to settle on facing anchors.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{trace, warn};

use crate::anchor::{map_all_sides, map_sides, resolve_anchor, SideMapping};
use crate::diagram::{Diagram, DiagramNode, Link};
use crate::geometry::Point;

/// Final drawing geometry of one link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedLink {
    pub link_id: String,
    pub solide_id: String,
    pub from: Point,
    pub to: Point,
}

impl RoutedLink {
    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }
}

/// Resolved inputs of one link endpoint pair
struct Endpoints<'a> {
    link: &'a Link,
    from: &'a DiagramNode,
    to: &'a DiagramNode,
    from_sides: &'a SideMapping,
    to_sides: &'a SideMapping,
}

impl Endpoints<'_> {
    fn resolve_from(&self, target: Point) -> Point {
        resolve_anchor(
            self.from,
            target,
            &self.link.solide_id,
            self.from_sides,
            self.link.from_anchor_idx,
        )
    }

    fn resolve_to(&self, target: Point) -> Point {
        resolve_anchor(
            self.to,
            target,
            &self.link.solide_id,
            self.to_sides,
            self.link.to_anchor_idx,
        )
    }

    /// Each end aims at the other joint's origin
    fn first_pass(&self) -> (Point, Point) {
        (
            self.resolve_from(self.to.position()),
            self.resolve_to(self.from.position()),
        )
    }

    /// Each end aims at the other end's first-pass point
    fn second_pass(&self, first: (Point, Point)) -> RoutedLink {
        let (from_first, to_first) = first;
        RoutedLink {
            link_id: self.link.id.clone(),
            solide_id: self.link.solide_id.clone(),
            from: self.resolve_from(to_first),
            to: self.resolve_to(from_first),
        }
    }
}

/// Route a single link of the diagram.
///
/// Returns None when either endpoint references a missing node.
pub fn route_link(diagram: &Diagram, link: &Link) -> Option<RoutedLink> {
    let from = diagram.node(&link.from_node_id)?;
    let to = diagram.node(&link.to_node_id)?;
    let from_sides = map_sides(from, diagram.links());
    let to_sides = map_sides(to, diagram.links());

    let endpoints = Endpoints {
        link,
        from,
        to,
        from_sides: &from_sides,
        to_sides: &to_sides,
    };
    Some(endpoints.second_pass(endpoints.first_pass()))
}

/// Route every link, in creation order. Links with a missing node are skipped.
pub fn route_links(diagram: &Diagram) -> Vec<RoutedLink> {
    let nodes = diagram.node_map();
    let sides = map_all_sides(diagram);
    let no_sides = SideMapping::default();

    let endpoints: Vec<Endpoints> = diagram
        .links()
        .iter()
        .filter_map(|link| {
            let (Some(from), Some(to)) = (
                nodes.get(link.from_node_id.as_str()).copied(),
                nodes.get(link.to_node_id.as_str()).copied(),
            ) else {
                warn!(link = %link.id, "skipping link with a missing endpoint node");
                return None;
            };
            Some(Endpoints {
                link,
                from,
                to,
                from_sides: sides.get(&from.id).unwrap_or(&no_sides),
                to_sides: sides.get(&to.id).unwrap_or(&no_sides),
            })
        })
        .collect();

    let first: Vec<(Point, Point)> = endpoints.iter().map(Endpoints::first_pass).collect();

    let routed: Vec<RoutedLink> = endpoints
        .iter()
        .zip(first)
        .map(|(ends, first)| ends.second_pass(first))
        .collect();

    trace!(links = routed.len(), "routed links");
    routed
}

/// Routed links keyed by link id
pub fn route_map(diagram: &Diagram) -> HashMap<String, RoutedLink> {
    route_links(diagram)
        .into_iter()
        .map(|routed| (routed.link_id.clone(), routed))
        .collect()
}
