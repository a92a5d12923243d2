//! Which bodies meet at which joints
//!
//! The adjacency is rebuilt from the links on every query; nothing here is
//! cached or mutated.

use std::collections::HashMap;

use serde::Serialize;

use crate::diagram::{Diagram, Link, GROUND_SOLIDE_ID};

/// Distinct solide ids touching each node, both in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSolides {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl NodeSolides {
    /// Build the adjacency from links, visiting the from node before the to node
    pub fn from_links(links: &[Link]) -> Self {
        let mut adjacency = Self::default();
        for link in links {
            adjacency.insert(&link.from_node_id, &link.solide_id);
            adjacency.insert(&link.to_node_id, &link.solide_id);
        }
        adjacency
    }

    fn insert(&mut self, node_id: &str, solide_id: &str) {
        let slot = match self.index.get(node_id) {
            Some(&slot) => slot,
            None => {
                self.entries.push((node_id.to_string(), Vec::new()));
                self.index.insert(node_id.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let solides = &mut self.entries[slot].1;
        if !solides.iter().any(|s| s == solide_id) {
            solides.push(solide_id.to_string());
        }
    }

    pub fn get(&self, node_id: &str) -> Option<&[String]> {
        self.index
            .get(node_id)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(node, solides)| (node.as_str(), solides.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One edge of the liaison graph: two bodies joined at a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolideConnection {
    pub solide1: String,
    pub solide2: String,
    pub liaison: String,
    pub node: String,
}

/// One row of the liaison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiaisonRow {
    pub link: String,
    pub liaison: String,
    pub solide: String,
    pub color: String,
    pub dof: u32,
}

fn solide_name<'a>(diagram: &'a Diagram, id: &'a str) -> &'a str {
    match diagram.solide(id) {
        Some(solide) if !solide.name.is_empty() => &solide.name,
        _ => id,
    }
}

/// Body-to-body connections, one per unordered solide pair at each node
pub fn liaison_graph(diagram: &Diagram) -> Vec<SolideConnection> {
    let adjacency = NodeSolides::from_links(diagram.links());
    let mut connections = Vec::new();

    for (node_id, solides) in adjacency.iter() {
        if solides.len() < 2 {
            continue;
        }
        let Some(node) = diagram.node(node_id) else {
            continue;
        };

        for (i, first) in solides.iter().enumerate() {
            for second in &solides[i + 1..] {
                connections.push(SolideConnection {
                    solide1: solide_name(diagram, first).to_string(),
                    solide2: solide_name(diagram, second).to_string(),
                    liaison: node.liaison_type.name().to_string(),
                    node: node.display_label().to_string(),
                });
            }
        }
    }
    connections
}

/// One row per link whose endpoints both exist, typed by the from node
pub fn liaison_table(diagram: &Diagram) -> Vec<LiaisonRow> {
    diagram
        .links()
        .iter()
        .filter_map(|link| {
            let from = diagram.node(&link.from_node_id)?;
            diagram.node(&link.to_node_id)?;

            let solide = diagram.solide(&link.solide_id);
            Some(LiaisonRow {
                link: link.display_label().to_string(),
                liaison: from.liaison_type.name().to_string(),
                solide: solide
                    .map(|s| s.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or("?")
                    .to_string(),
                color: solide.map_or("#999999", |s| s.color.as_str()).to_string(),
                dof: from.liaison_type.dof(),
            })
        })
        .collect()
}

/// Ids of nodes touched by a ground link, in first-seen order
pub fn ground_nodes(links: &[Link]) -> Vec<String> {
    let mut nodes: Vec<String> = Vec::new();
    for link in links.iter().filter(|l| l.solide_id == GROUND_SOLIDE_ID) {
        for id in [&link.from_node_id, &link.to_node_id] {
            if !nodes.contains(id) {
                nodes.push(id.clone());
            }
        }
    }
    nodes
}
