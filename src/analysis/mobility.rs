//! Grübler mobility count for planar and spatial mechanisms
//!
//! A joint where `k` bodies meet is counted as `k - 1` binary liaisons of its
//! type. With `n` bodies (ground included):
//!
//! ```text
//! m2D = 3(n-1) - Σnc_2D
//! m3D = 6(n-1) - 6L + Σdof_3D
//! h2D = max(0, -m2D)
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::catalog::LiaisonType;
use crate::diagram::{DiagramNode, Link, Solide};

use super::topology::NodeSolides;

/// Planar verdict derived from `m2D`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MobilityStatus {
    Mobile { degrees: u32 },
    Isostatic,
    Hyperstatic { degree: u32 },
}

impl MobilityStatus {
    pub fn from_m2d(m2d: i64) -> Self {
        match m2d {
            m if m > 0 => MobilityStatus::Mobile { degrees: m as u32 },
            0 => MobilityStatus::Isostatic,
            m => MobilityStatus::Hyperstatic {
                degree: m.unsigned_abs() as u32,
            },
        }
    }
}

impl fmt::Display for MobilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobilityStatus::Mobile { degrees: 1 } => write!(f, "mobile mechanism (1 degree of mobility)"),
            MobilityStatus::Mobile { degrees } => {
                write!(f, "mobile mechanism ({} degrees of mobility)", degrees)
            }
            MobilityStatus::Isostatic => write!(f, "isostatic mechanism"),
            MobilityStatus::Hyperstatic { degree } => {
                write!(f, "hyperstatic mechanism (degree {})", degree)
            }
        }
    }
}

/// Binary liaisons contributed by one joint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiaisonContribution {
    pub node_id: String,
    pub liaison_type: LiaisonType,
    pub count: u32,
}

/// Result of the mobility count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobilityReport {
    /// Body count `n`, ground included
    pub solides: usize,
    /// Effective binary liaison count `L`
    pub liaisons: u32,
    pub sum_nc_2d: u32,
    pub sum_dof_3d: u32,
    pub m_2d: i64,
    pub m_3d: i64,
    pub h_2d: i64,
    pub status: MobilityStatus,
    pub contributions: Vec<LiaisonContribution>,
}

impl fmt::Display for MobilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mobility (Grübler)")?;
        writeln!(f, "  solides (n)      {}", self.solides)?;
        writeln!(f, "  liaisons (L)     {}", self.liaisons)?;
        writeln!(f, "  Σ nc (2D)        {}", self.sum_nc_2d)?;
        writeln!(f, "  Σ dof (3D)       {}", self.sum_dof_3d)?;
        writeln!(f, "  3(n-1)           {}", 3 * (self.solides as i64 - 1))?;
        writeln!(f, "  m (2D)           {}", self.m_2d)?;
        writeln!(f, "  m (3D)           {}", self.m_3d)?;
        if self.h_2d > 0 {
            writeln!(f, "  h (2D)           {}", self.h_2d)?;
        }
        write!(f, "{}", self.status)
    }
}

/// Count mobility and hyperstatism of the mechanism.
///
/// Returns None when there is at most one body or no joint joins two bodies.
pub fn analyze_mobility(
    nodes: &[DiagramNode],
    links: &[Link],
    solides: &[Solide],
) -> Option<MobilityReport> {
    let adjacency = NodeSolides::from_links(links);

    let contributions: Vec<LiaisonContribution> = adjacency
        .iter()
        .filter(|(_, touching)| touching.len() >= 2)
        .filter_map(|(node_id, touching)| {
            let node = nodes.iter().find(|n| n.id == node_id)?;
            Some(LiaisonContribution {
                node_id: node_id.to_string(),
                liaison_type: node.liaison_type,
                count: (touching.len() - 1) as u32,
            })
        })
        .collect();

    let n = solides.len();
    let liaisons: u32 = contributions.iter().map(|c| c.count).sum();
    if n <= 1 || liaisons == 0 {
        debug!(solides = n, liaisons, "mechanism too small for a mobility count");
        return None;
    }

    let sum_nc_2d: u32 = contributions
        .iter()
        .map(|c| c.liaison_type.nc_2d() * c.count)
        .sum();
    let sum_dof_3d: u32 = contributions
        .iter()
        .map(|c| c.liaison_type.dof() * c.count)
        .sum();

    let bodies = n as i64 - 1;
    let m_2d = 3 * bodies - sum_nc_2d as i64;
    let m_3d = 6 * bodies - 6 * liaisons as i64 + sum_dof_3d as i64;
    let h_2d = (-m_2d).max(0);
    let status = MobilityStatus::from_m2d(m_2d);

    debug!(solides = n, liaisons, m_2d, m_3d, h_2d, %status, "mobility analysis");

    Some(MobilityReport {
        solides: n,
        liaisons,
        sum_nc_2d,
        sum_dof_3d,
        m_2d,
        m_3d,
        h_2d,
        status,
        contributions,
    })
}
