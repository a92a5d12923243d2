//! Hand-authored attachment points for every joint symbol and view
//!
//! Offsets are in the symbol's local frame (before rotation), in canvas
//! units, Y pointing down. Each point is tagged with the half of the symbol it
//! belongs to: side A is the part drawn for one body (shaft, inner ring,
//! upper contact), side B the part drawn for the other (housing, outer ring,
//! lower contact).

use serde::Serialize;

use crate::catalog::{LiaisonType, LiaisonView};
use crate::geometry::Point;

/// Mechanical half of a joint symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A discrete attachment point on a joint symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
    pub side: Side,
}

impl AnchorPoint {
    const fn new(x: f64, y: f64, side: Side) -> Self {
        Self { x, y, side }
    }

    /// Local offset as a point
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

use Side::{A, B};

// Pivot front view: flanges (A) left/right, bearing block (B) top/bottom
const PIVOT_1: &[AnchorPoint] = &[
    AnchorPoint::new(-34.0, 0.0, A),
    AnchorPoint::new(34.0, 0.0, A),
    AnchorPoint::new(0.0, -11.0, B),
    AnchorPoint::new(0.0, 11.0, B),
];

// Pivot side view: plain circle, every anchor on its rim
const PIVOT_2: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -12.0, A),
    AnchorPoint::new(0.0, 12.0, A),
    AnchorPoint::new(-12.0, 0.0, A),
    AnchorPoint::new(12.0, 0.0, A),
];

// Slider front view: rectangle top/bottom (A), sides (B)
const GLISSIERE_1: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -11.0, A),
    AnchorPoint::new(0.0, 11.0, A),
    AnchorPoint::new(-22.0, 0.0, B),
    AnchorPoint::new(22.0, 0.0, B),
];

// Slider section: square edges (A), cross at the center (B)
const GLISSIERE_2: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -10.0, A),
    AnchorPoint::new(0.0, 10.0, A),
    AnchorPoint::new(-10.0, 0.0, A),
    AnchorPoint::new(10.0, 0.0, A),
    AnchorPoint::new(0.0, 0.0, B),
];

const PIVOT_GLISSANT_1: &[AnchorPoint] = &[
    AnchorPoint::new(-22.0, 0.0, A),
    AnchorPoint::new(22.0, 0.0, A),
    AnchorPoint::new(0.0, -11.0, B),
    AnchorPoint::new(0.0, 11.0, B),
];

const PIVOT_GLISSANT_2: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -12.0, A),
    AnchorPoint::new(0.0, 12.0, A),
    AnchorPoint::new(-12.0, 0.0, B),
    AnchorPoint::new(12.0, 0.0, B),
];

// Ball joint: inner ball (A) right, 3/4 socket (B) left
const ROTULE_1: &[AnchorPoint] = &[
    AnchorPoint::new(12.0, 0.0, A),
    AnchorPoint::new(-15.0, 0.0, B),
];

// Weld: a single undifferentiated point
const ENCASTREMENT_1: &[AnchorPoint] = &[AnchorPoint::new(0.0, 0.0, A)];

const HELICOIDALE_1: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -11.0, A),
    AnchorPoint::new(0.0, 11.0, A),
    AnchorPoint::new(-22.0, 0.0, B),
    AnchorPoint::new(22.0, 0.0, B),
];

const HELICOIDALE_2: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -12.0, A),
    AnchorPoint::new(0.0, 12.0, A),
    AnchorPoint::new(-12.0, 0.0, B),
    AnchorPoint::new(12.0, 0.0, B),
];

const ROTULE_DOIGT_1: &[AnchorPoint] = &[
    AnchorPoint::new(12.0, 0.0, A),
    AnchorPoint::new(-15.0, 0.0, B),
];

// Plane contact: upper line (A), lower line (B)
const APPUI_PLAN_1: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -3.0, A),
    AnchorPoint::new(0.0, 3.0, B),
];

const LINEAIRE_ANNULAIRE_1: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -18.0, A),
    AnchorPoint::new(0.0, 10.0, B),
];

const LINEAIRE_ANNULAIRE_2: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -12.0, A),
    AnchorPoint::new(0.0, 15.0, B),
];

const LINEAIRE_RECTILIGNE_1: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -11.0, A),
    AnchorPoint::new(0.0, 11.0, B),
];

const LINEAIRE_RECTILIGNE_2: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -11.0, A),
    AnchorPoint::new(0.0, 11.0, B),
];

const PONCTUELLE_1: &[AnchorPoint] = &[
    AnchorPoint::new(0.0, -12.0, A),
    AnchorPoint::new(0.0, 12.0, B),
];

/// Attachment points of a joint symbol in the given view.
///
/// Returns an empty slice for combinations the symbol does not define (the
/// second view of a single-view joint); callers fall back to the node origin.
pub fn get_anchors(liaison_type: LiaisonType, view: LiaisonView) -> &'static [AnchorPoint] {
    use LiaisonType::*;
    use LiaisonView::*;

    match (liaison_type, view) {
        (Pivot, First) => PIVOT_1,
        (Pivot, Second) => PIVOT_2,
        (Glissiere, First) => GLISSIERE_1,
        (Glissiere, Second) => GLISSIERE_2,
        (PivotGlissant, First) => PIVOT_GLISSANT_1,
        (PivotGlissant, Second) => PIVOT_GLISSANT_2,
        (Rotule, First) => ROTULE_1,
        (Encastrement, First) => ENCASTREMENT_1,
        (Helicoidale, First) => HELICOIDALE_1,
        (Helicoidale, Second) => HELICOIDALE_2,
        (RotuleDoigt, First) => ROTULE_DOIGT_1,
        (AppuiPlan, First) => APPUI_PLAN_1,
        (LineaireAnnulaire, First) => LINEAIRE_ANNULAIRE_1,
        (LineaireAnnulaire, Second) => LINEAIRE_ANNULAIRE_2,
        (LineaireRectiligne, First) => LINEAIRE_RECTILIGNE_1,
        (LineaireRectiligne, Second) => LINEAIRE_RECTILIGNE_2,
        (Ponctuelle, First) => PONCTUELLE_1,
        (Rotule | Encastrement | RotuleDoigt | AppuiPlan | Ponctuelle, Second) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_view_has_anchors() {
        let mut combinations = 0;
        for t in LiaisonType::ALL {
            for view in [LiaisonView::First, LiaisonView::Second] {
                let anchors = get_anchors(t, view);
                if t.supports_view(view) {
                    combinations += 1;
                    assert!(
                        (1..=5).contains(&anchors.len()),
                        "{}:{} has {} anchors",
                        t,
                        view.number(),
                        anchors.len()
                    );
                } else {
                    assert!(anchors.is_empty(), "{}:{} should be empty", t, view.number());
                }
            }
        }
        assert_eq!(combinations, 17);
    }

    #[test]
    fn test_pivot_front_view() {
        let anchors = get_anchors(LiaisonType::Pivot, LiaisonView::First);
        assert_eq!(anchors.len(), 4);
        assert_eq!(anchors[0], AnchorPoint::new(-34.0, 0.0, Side::A));
        assert_eq!(anchors[3], AnchorPoint::new(0.0, 11.0, Side::B));
    }

    #[test]
    fn test_single_sided_symbols() {
        let pivot_side = get_anchors(LiaisonType::Pivot, LiaisonView::Second);
        assert!(pivot_side.iter().all(|a| a.side == Side::A));

        let weld = get_anchors(LiaisonType::Encastrement, LiaisonView::First);
        assert_eq!(weld, &[AnchorPoint::new(0.0, 0.0, Side::A)]);
    }

    #[test]
    fn test_two_sided_symbols_expose_both_sides() {
        for t in LiaisonType::ALL {
            let anchors = get_anchors(t, LiaisonView::First);
            if anchors.len() < 2 {
                continue;
            }
            assert!(anchors.iter().any(|a| a.side == Side::A), "{} lacks side A", t);
            assert!(anchors.iter().any(|a| a.side == Side::B), "{} lacks side B", t);
        }
    }

    #[test]
    fn test_lookup_is_stable() {
        let first = get_anchors(LiaisonType::Glissiere, LiaisonView::Second);
        let second = get_anchors(LiaisonType::Glissiere, LiaisonView::Second);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }
}
