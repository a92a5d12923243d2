//! Static catalog of joint ("liaison") types
//!
//! Each joint type carries its display name, the degrees of freedom it allows
//! in 3D, how many technical drawing views exist for its symbol, and the
//! number of planar constraints it imposes (`nc = 3 - dof_2D`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The eleven standardized joint kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiaisonType {
    Pivot,
    Glissiere,
    PivotGlissant,
    Rotule,
    Encastrement,
    Helicoidale,
    RotuleDoigt,
    AppuiPlan,
    LineaireAnnulaire,
    LineaireRectiligne,
    Ponctuelle,
}

/// Drawing view of a joint symbol (front view or side view)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LiaisonView {
    #[default]
    First,
    Second,
}

impl LiaisonView {
    /// 1-based view number as shown to users
    pub fn number(self) -> u8 {
        match self {
            LiaisonView::First => 1,
            LiaisonView::Second => 2,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid view number {0} (expected 1 or 2)")]
pub struct InvalidViewNumber(pub u8);

impl TryFrom<u8> for LiaisonView {
    type Error = InvalidViewNumber;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LiaisonView::First),
            2 => Ok(LiaisonView::Second),
            other => Err(InvalidViewNumber(other)),
        }
    }
}

impl From<LiaisonView> for u8 {
    fn from(view: LiaisonView) -> u8 {
        view.number()
    }
}

/// Catalog entry for one joint type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiaisonDefinition {
    pub liaison_type: LiaisonType,
    pub name: &'static str,
    /// Degrees of freedom in 3D
    pub dof: u32,
    pub description: &'static str,
    /// Number of drawing views (1 or 2)
    pub view_count: u8,
    /// Planar constraint count
    pub nc_2d: u32,
}

pub const LIAISON_CATALOG: &[LiaisonDefinition] = &[
    LiaisonDefinition {
        liaison_type: LiaisonType::Pivot,
        name: "Pivot",
        dof: 1,
        description: "1 rotation (Rz)",
        view_count: 2,
        nc_2d: 2,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::Glissiere,
        name: "Glissière",
        dof: 1,
        description: "1 translation (Tz)",
        view_count: 2,
        nc_2d: 2,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::PivotGlissant,
        name: "Pivot glissant",
        dof: 2,
        description: "1 rotation + 1 translation",
        view_count: 2,
        nc_2d: 1,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::Rotule,
        name: "Rotule",
        dof: 3,
        description: "3 rotations (Rx, Ry, Rz)",
        view_count: 1,
        // planar projection behaves like a pivot
        nc_2d: 2,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::Encastrement,
        name: "Encastrement",
        dof: 0,
        description: "0 degrés de liberté",
        view_count: 1,
        nc_2d: 3,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::Helicoidale,
        name: "Hélicoïdale",
        dof: 1,
        description: "1 rotation + 1 translation liées",
        view_count: 2,
        nc_2d: 2,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::RotuleDoigt,
        name: "Rotule à doigt",
        dof: 2,
        description: "2 rotations (Rx, Ry)",
        view_count: 1,
        nc_2d: 2,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::AppuiPlan,
        name: "Appui plan",
        dof: 3,
        description: "2 translations + 1 rotation",
        view_count: 1,
        nc_2d: 1,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::LineaireAnnulaire,
        name: "Linéaire annulaire",
        dof: 4,
        description: "3 rotations + 1 translation",
        view_count: 2,
        nc_2d: 1,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::LineaireRectiligne,
        name: "Linéaire rectiligne",
        dof: 4,
        description: "2 rotations + 2 translations",
        view_count: 2,
        nc_2d: 1,
    },
    LiaisonDefinition {
        liaison_type: LiaisonType::Ponctuelle,
        name: "Ponctuelle",
        dof: 5,
        description: "3 rotations + 2 translations",
        view_count: 1,
        nc_2d: 1,
    },
];

impl LiaisonType {
    pub const ALL: [LiaisonType; 11] = [
        LiaisonType::Pivot,
        LiaisonType::Glissiere,
        LiaisonType::PivotGlissant,
        LiaisonType::Rotule,
        LiaisonType::Encastrement,
        LiaisonType::Helicoidale,
        LiaisonType::RotuleDoigt,
        LiaisonType::AppuiPlan,
        LiaisonType::LineaireAnnulaire,
        LiaisonType::LineaireRectiligne,
        LiaisonType::Ponctuelle,
    ];

    /// Catalog entry for this joint type
    pub fn definition(self) -> &'static LiaisonDefinition {
        // ALL and LIAISON_CATALOG share the same order
        &LIAISON_CATALOG[self as usize]
    }

    /// Identifier used in documents (`pivot_glissant`, ...)
    pub fn key(self) -> &'static str {
        match self {
            LiaisonType::Pivot => "pivot",
            LiaisonType::Glissiere => "glissiere",
            LiaisonType::PivotGlissant => "pivot_glissant",
            LiaisonType::Rotule => "rotule",
            LiaisonType::Encastrement => "encastrement",
            LiaisonType::Helicoidale => "helicoidale",
            LiaisonType::RotuleDoigt => "rotule_doigt",
            LiaisonType::AppuiPlan => "appui_plan",
            LiaisonType::LineaireAnnulaire => "lineaire_annulaire",
            LiaisonType::LineaireRectiligne => "lineaire_rectiligne",
            LiaisonType::Ponctuelle => "ponctuelle",
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn dof(self) -> u32 {
        self.definition().dof
    }

    pub fn nc_2d(self) -> u32 {
        self.definition().nc_2d
    }

    pub fn view_count(self) -> u8 {
        self.definition().view_count
    }

    /// Whether the symbol can be drawn in the given view
    pub fn supports_view(self, view: LiaisonView) -> bool {
        view.number() <= self.view_count()
    }
}

impl fmt::Display for LiaisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown liaison type '{0}'")]
pub struct UnknownLiaisonType(pub String);

impl FromStr for LiaisonType {
    type Err = UnknownLiaisonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LiaisonType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLiaisonType(trimmed.to_string()))
    }
}
