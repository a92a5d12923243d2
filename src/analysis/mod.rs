//! Structural analysis of a diagram: body adjacency and mobility

pub mod mobility;
pub mod topology;

pub use mobility::{analyze_mobility, LiaisonContribution, MobilityReport, MobilityStatus};
pub use topology::{ground_nodes, liaison_graph, liaison_table, LiaisonRow, NodeSolides, SolideConnection};

use crate::diagram::Diagram;

/// Mobility of the whole diagram
pub fn analyze_diagram(diagram: &Diagram) -> Option<MobilityReport> {
    analyze_mobility(diagram.nodes(), diagram.links(), diagram.solides())
}
