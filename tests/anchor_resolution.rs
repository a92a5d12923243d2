//! Integration tests for anchor lookup and endpoint resolution.
//!
//! These tests verify that:
//! - Every joint type/view exposes its anchors through the public table
//! - Pinned anchors are returned exactly, rotated with the node
//! - Automatic resolution always lands on an anchor (or the origin)
//! - Resolution commutes with rotating the node and its target together

use kinesketch::anchor::{anchor_world_by_index, world_anchors};
use kinesketch::geometry::RotationTransform;
use kinesketch::{
    get_anchors, resolve_anchor, DiagramNode, LiaisonType, LiaisonView, Point, Side, SideMapping,
};

const EPS: f64 = 1e-9;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

fn all_nodes() -> Vec<DiagramNode> {
    let mut nodes = Vec::new();
    for t in LiaisonType::ALL {
        for view in [LiaisonView::First, LiaisonView::Second] {
            if t.supports_view(view) {
                nodes.push(DiagramNode::new("n1", t, 50.0, -20.0).with_view(view));
            }
        }
    }
    nodes
}

#[test]
fn test_table_covers_every_view() {
    let nodes = all_nodes();
    assert_eq!(nodes.len(), 17);
    for node in &nodes {
        let anchors = get_anchors(node.liaison_type, node.view);
        assert!(
            !anchors.is_empty(),
            "{}:{} has no anchors",
            node.liaison_type,
            node.view.number()
        );
    }
}

#[test]
fn test_forced_anchor_matches_world_transform() {
    for angle in [0.0, 30.0, 90.0, 135.0, 270.0] {
        for node in all_nodes() {
            let node = node.with_rotation(angle);
            let transform = RotationTransform::new(angle, node.position());
            for (index, anchor) in get_anchors(node.liaison_type, node.view).iter().enumerate() {
                let expected = transform.place_offset(anchor.offset());
                let resolved = resolve_anchor(
                    &node,
                    Point::new(1000.0, 1000.0),
                    "s1",
                    &SideMapping::default(),
                    Some(index),
                );
                assert!(close(resolved, expected), "{:?} != {:?}", resolved, expected);
                assert_eq!(anchor_world_by_index(&node, index), Some(resolved));
            }
        }
    }
}

#[test]
fn test_forced_anchor_is_periodic() {
    for node in all_nodes() {
        let count = get_anchors(node.liaison_type, node.view).len();
        for index in 0..count {
            let resolve = |angle: f64| {
                resolve_anchor(
                    &node.clone().with_rotation(angle),
                    Point::new(-300.0, 75.0),
                    "s2",
                    &SideMapping::default(),
                    Some(index),
                )
            };
            let (flat, turned) = (resolve(0.0), resolve(360.0));
            assert!(close(flat, turned), "{:?} != {:?}", flat, turned);
            assert!(close(resolve(-360.0), flat));
        }
    }
}

#[test]
fn test_auto_resolution_lands_on_an_anchor() {
    let targets = [
        Point::new(0.0, 0.0),
        Point::new(300.0, -12.0),
        Point::new(-75.0, 140.0),
        Point::new(51.0, -19.0),
    ];
    for node in all_nodes() {
        let node = node.with_rotation(45.0);
        let candidates: Vec<Point> = world_anchors(&node).into_iter().map(|(_, p)| p).collect();
        for target in targets {
            let resolved = resolve_anchor(&node, target, "s1", &SideMapping::default(), None);
            assert!(
                candidates.iter().any(|c| close(*c, resolved)),
                "{}:{} resolved off-anchor",
                node.liaison_type,
                node.view.number()
            );

            // nothing closer exists
            let best = resolved.distance_squared(target);
            assert!(candidates.iter().all(|c| c.distance_squared(target) >= best - EPS));
        }
    }
}

#[test]
fn test_missing_view_resolves_to_origin() {
    let node = DiagramNode::new("n1", LiaisonType::Ponctuelle, 12.0, 34.0).with_view(LiaisonView::Second);
    assert!(get_anchors(node.liaison_type, node.view).is_empty());

    let resolved = resolve_anchor(&node, Point::new(0.0, 0.0), "s1", &SideMapping::default(), Some(0));
    assert_eq!(resolved, Point::new(12.0, 34.0));
    assert_eq!(anchor_world_by_index(&node, 0), None);
}

#[test]
fn test_side_filter_restricts_candidates() {
    let mapping = SideMapping {
        side_a: Some("s1".to_string()),
        side_b: Some("s2".to_string()),
    };
    for t in LiaisonType::ALL {
        let node = DiagramNode::new("n1", t, 0.0, 0.0);
        let anchors = get_anchors(t, LiaisonView::First);
        let has_b = anchors.iter().any(|a| a.side == Side::B);
        if !has_b {
            continue;
        }

        for target in [Point::new(100.0, 3.0), Point::new(-7.0, -90.0)] {
            let resolved = resolve_anchor(&node, target, "s2", &mapping, None);
            let on_b = world_anchors(&node)
                .into_iter()
                .filter(|(a, _)| a.side == Side::B)
                .any(|(_, p)| close(p, resolved));
            assert!(on_b, "{} resolved outside side B", t);
        }
    }
}

#[test]
fn test_resolution_commutes_with_rotation() {
    let origin = Point::new(120.0, 80.0);
    let local_target = Point::new(37.0, 81.0);

    for node in all_nodes() {
        let flat = DiagramNode { x: origin.x, y: origin.y, ..node.clone() };
        let unrotated = resolve_anchor(&flat, origin + local_target, "s1", &SideMapping::default(), None);

        for angle in [60.0, 180.0, 300.0] {
            let turn = RotationTransform::new(angle, origin);
            let rotated_node = flat.clone().with_rotation(angle);
            let rotated_target = turn.transform_point(origin + local_target);

            let resolved = resolve_anchor(&rotated_node, rotated_target, "s1", &SideMapping::default(), None);
            let expected = turn.transform_point(unrotated);
            assert!(
                (resolved.x - expected.x).abs() < 1e-6 && (resolved.y - expected.y).abs() < 1e-6,
                "{}:{} at {}°: {:?} != {:?}",
                node.liaison_type,
                node.view.number(),
                angle,
                resolved,
                expected
            );
        }
    }
}
