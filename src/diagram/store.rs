//! The editable diagram: nodes, links, solides and their cascade rules

use std::collections::HashMap;

use tracing::debug;

use crate::anchor::get_anchors;
use crate::catalog::{LiaisonType, LiaisonView};
use crate::geometry::{normalize_degrees, Point};
use crate::palette::Palette;

use super::config::DiagramConfig;
use super::error::DiagramError;
use super::ids::IdGenerator;
use super::types::{AngleArc, DiagramNode, Link, LinkEnd, Solide, GROUND_SOLIDE_ID};

pub type Result<T> = std::result::Result<T, DiagramError>;

/// A kinematic diagram under edit.
///
/// Records are kept in creation order, which is the order the side mapper
/// folds links in. The ground solide always exists.
#[derive(Debug, Clone)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    links: Vec<Link>,
    solides: Vec<Solide>,
    angle_arcs: Vec<AngleArc>,
    active_solide_id: String,
    ids: IdGenerator,
    config: DiagramConfig,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    /// Empty diagram holding only the ground, colored from the default palette
    pub fn new() -> Self {
        Self::with_palette(&Palette::default())
    }

    pub fn with_palette(palette: &Palette) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            solides: vec![Solide::ground(palette.ground_color())],
            angle_arcs: Vec::new(),
            active_solide_id: GROUND_SOLIDE_ID.to_string(),
            ids: IdGenerator::new(),
            config: DiagramConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiagramConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble a diagram from loaded records.
    ///
    /// Inserts the ground when missing and reseeds the id counters past every
    /// loaded id.
    pub fn from_parts(
        nodes: Vec<DiagramNode>,
        links: Vec<Link>,
        mut solides: Vec<Solide>,
        angle_arcs: Vec<AngleArc>,
        palette: &Palette,
    ) -> Self {
        if !solides.iter().any(Solide::is_ground) {
            solides.insert(0, Solide::ground(palette.ground_color()));
        }

        let item_ids = nodes
            .iter()
            .map(|n| n.id.as_str())
            .chain(links.iter().map(|l| l.id.as_str()))
            .chain(angle_arcs.iter().map(|a| a.id.as_str()));
        let ids = IdGenerator::reseed(item_ids, solides.iter().map(|s| s.id.as_str()));

        Self {
            nodes,
            links,
            solides,
            angle_arcs,
            active_solide_id: GROUND_SOLIDE_ID.to_string(),
            ids,
            config: DiagramConfig::default(),
        }
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn solides(&self) -> &[Solide] {
        &self.solides
    }

    pub fn angle_arcs(&self) -> &[AngleArc] {
        &self.angle_arcs
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn active_solide_id(&self) -> &str {
        &self.active_solide_id
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn solide(&self, id: &str) -> Option<&Solide> {
        self.solides.iter().find(|s| s.id == id)
    }

    /// Node lookup table keyed by id
    pub fn node_map(&self) -> HashMap<&str, &DiagramNode> {
        self.nodes.iter().map(|n| (n.id.as_str(), n)).collect()
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut DiagramNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DiagramError::unknown_node(id))
    }

    fn link_mut(&mut self, id: &str) -> Result<&mut Link> {
        self.links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DiagramError::unknown_link(id))
    }

    fn solide_mut(&mut self, id: &str) -> Result<&mut Solide> {
        self.solides
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DiagramError::unknown_solide(id))
    }

    fn require_solide(&self, id: &str) -> Result<()> {
        self.solide(id)
            .map(|_| ())
            .ok_or_else(|| DiagramError::unknown_solide(id))
    }

    // ---- nodes ----

    /// Place a joint symbol and return its id
    pub fn add_node(&mut self, liaison_type: LiaisonType, x: f64, y: f64) -> String {
        let id = self.ids.next_node_id();
        let at = self.config.place(Point::new(x, y));
        let mut node = DiagramNode::new(id.clone(), liaison_type, at.x, at.y);
        (node.label_offset_x, node.label_offset_y) = self.config.node_label_offset;
        debug!(node = %id, liaison = %liaison_type, "added node");
        self.nodes.push(node);
        id
    }

    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let at = self.config.place(Point::new(x, y));
        let node = self.node_mut(id)?;
        node.x = at.x;
        node.y = at.y;
        Ok(())
    }

    /// Move several nodes at once; nothing moves if any id is unknown
    pub fn move_nodes(&mut self, moves: &[(&str, Point)]) -> Result<()> {
        if let Some((missing, _)) = moves.iter().find(|(id, _)| self.node(id).is_none()) {
            return Err(DiagramError::unknown_node(*missing));
        }
        for (id, to) in moves {
            self.move_node(id, to.x, to.y)?;
        }
        Ok(())
    }

    /// Set the absolute rotation, stored normalized to `[0, 360)`
    pub fn rotate_node(&mut self, id: &str, degrees: f64) -> Result<()> {
        self.node_mut(id)?.rotation = normalize_degrees(degrees);
        Ok(())
    }

    pub fn set_node_view(&mut self, id: &str, view: LiaisonView) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.liaison_type.supports_view(view) {
            return Err(DiagramError::UnsupportedView {
                liaison: node.liaison_type,
                view,
            });
        }
        node.view = view;
        Ok(())
    }

    pub fn set_node_label(&mut self, id: &str, label: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.label = label.into();
        Ok(())
    }

    pub fn set_node_label_offset(&mut self, id: &str, dx: f64, dy: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        node.label_offset_x = dx;
        node.label_offset_y = dy;
        Ok(())
    }

    /// Remove a node and every link touching it
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DiagramError::unknown_node(id))?;
        self.nodes.remove(index);

        let before = self.links.len();
        self.links.retain(|l| !l.touches(id));
        debug!(node = id, removed_links = before - self.links.len(), "deleted node");
        Ok(())
    }

    // ---- links ----

    /// Connect two joints with a link of the active solide and return its id.
    ///
    /// The label is derived from the active solide and the first other solide
    /// already attached to either endpoint, e.g. `L12`.
    pub fn add_link(&mut self, from: &str, to: &str) -> Result<String> {
        if self.node(from).is_none() {
            return Err(DiagramError::unknown_node(from));
        }
        if self.node(to).is_none() {
            return Err(DiagramError::unknown_node(to));
        }
        if from == to {
            return Err(DiagramError::SelfLink { id: from.to_string() });
        }

        let solide_id = self.active_solide_id.clone();
        let label = self.auto_link_label(from, to, &solide_id);
        let id = self.ids.next_link_id();

        let mut link = Link::new(id.clone(), from, to, solide_id).with_label(label);
        (link.label_offset_x, link.label_offset_y) = self.config.link_label_offset;
        debug!(link = %id, from, to, solide = %link.solide_id, "added link");
        self.links.push(link);
        Ok(id)
    }

    fn auto_link_label(&self, from: &str, to: &str, solide_id: &str) -> String {
        let mut touching: Vec<&str> = Vec::new();
        for node_id in [from, to] {
            for link in self.links.iter().filter(|l| l.touches(node_id)) {
                if !touching.contains(&link.solide_id.as_str()) {
                    touching.push(&link.solide_id);
                }
            }
        }

        match touching.into_iter().find(|s| *s != solide_id) {
            Some(other) => {
                let mut nums = [solide_number(solide_id), solide_number(other)];
                nums.sort_unstable();
                format!("L{}{}", nums[0], nums[1])
            }
            None => String::new(),
        }
    }

    /// Pin (or with `None`, unpin) the anchor used by one end of a link
    pub fn pin_link_anchor(&mut self, link_id: &str, end: LinkEnd, index: Option<usize>) -> Result<()> {
        let node_id = self
            .link(link_id)
            .ok_or_else(|| DiagramError::unknown_link(link_id))?
            .node_id(end)
            .to_string();

        if let Some(index) = index {
            let node = self
                .node(&node_id)
                .ok_or_else(|| DiagramError::unknown_node(&node_id))?;
            let count = get_anchors(node.liaison_type, node.view).len();
            if index >= count {
                return Err(DiagramError::invalid_anchor(node_id, index, count));
            }
        }

        let link = self.link_mut(link_id)?;
        match end {
            LinkEnd::From => link.from_anchor_idx = index,
            LinkEnd::To => link.to_anchor_idx = index,
        }
        Ok(())
    }

    pub fn delete_link(&mut self, id: &str) -> Result<()> {
        let index = self
            .links
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| DiagramError::unknown_link(id))?;
        self.links.remove(index);
        Ok(())
    }

    pub fn set_link_label(&mut self, id: &str, label: impl Into<String>) -> Result<()> {
        self.link_mut(id)?.label = label.into();
        Ok(())
    }

    pub fn set_link_label_offset(&mut self, id: &str, dx: f64, dy: f64) -> Result<()> {
        let link = self.link_mut(id)?;
        link.label_offset_x = dx;
        link.label_offset_y = dy;
        Ok(())
    }

    pub fn set_link_solide(&mut self, id: &str, solide_id: &str) -> Result<()> {
        self.require_solide(solide_id)?;
        self.link_mut(id)?.solide_id = solide_id.to_string();
        Ok(())
    }

    // ---- solides ----

    /// Create a solide colored from the palette cycle; it becomes active
    pub fn add_solide(&mut self, palette: &Palette) -> String {
        let index = self.ids.next_solide_index();
        let id = format!("s{}", index);
        let solide = Solide::new(id.clone(), format!("S{}", index), palette.solide_color(index));
        debug!(solide = %id, color = %solide.color, "added solide");
        self.solides.push(solide);
        self.active_solide_id = id.clone();
        id
    }

    /// Delete a solide, handing its links over to the ground
    pub fn delete_solide(&mut self, id: &str) -> Result<()> {
        if id == GROUND_SOLIDE_ID {
            return Err(DiagramError::GroundSolide);
        }
        let index = self
            .solides
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DiagramError::unknown_solide(id))?;
        self.solides.remove(index);

        for link in self.links.iter_mut().filter(|l| l.solide_id == id) {
            link.solide_id = GROUND_SOLIDE_ID.to_string();
        }
        if self.active_solide_id == id {
            self.active_solide_id = GROUND_SOLIDE_ID.to_string();
        }
        Ok(())
    }

    pub fn set_active_solide(&mut self, id: &str) -> Result<()> {
        self.require_solide(id)?;
        self.active_solide_id = id.to_string();
        Ok(())
    }

    pub fn set_solide_name(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.solide_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_solide_color(&mut self, id: &str, color: impl Into<String>) -> Result<()> {
        self.solide_mut(id)?.color = color.into();
        Ok(())
    }

    /// Show or hide the local frame of a solide; returns the new state
    pub fn toggle_solide_frame(&mut self, id: &str) -> Result<bool> {
        let solide = self.solide_mut(id)?;
        let shown = !solide.show_frame.unwrap_or(false);
        solide.show_frame = Some(shown);
        Ok(shown)
    }

    pub fn move_solide_frame(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let solide = self.solide_mut(id)?;
        solide.frame_x = Some(x);
        solide.frame_y = Some(y);
        Ok(())
    }

    // ---- angle arcs ----

    /// Add an angle annotation between two solides and return its id
    pub fn add_angle_arc(&mut self, from_solide: &str, to_solide: &str, x: f64, y: f64) -> Result<String> {
        self.require_solide(from_solide)?;
        self.require_solide(to_solide)?;
        let id = self.ids.next_angle_arc_id();
        self.angle_arcs.push(AngleArc {
            id: id.clone(),
            from_solide_id: from_solide.to_string(),
            to_solide_id: to_solide.to_string(),
            label: String::new(),
            radius: 30.0,
            x,
            y,
            label_offset_x: 0.0,
            label_offset_y: 0.0,
        });
        Ok(id)
    }

    pub fn delete_angle_arc(&mut self, id: &str) -> bool {
        let before = self.angle_arcs.len();
        self.angle_arcs.retain(|a| a.id != id);
        self.angle_arcs.len() != before
    }

    // ---- clipboard & reset ----

    /// Duplicate the given nodes, displaced by the paste offset, along with
    /// every link whose two ends are among them. Returns the new node ids.
    pub fn paste(&mut self, node_ids: &[&str]) -> Result<Vec<String>> {
        let sources: Vec<DiagramNode> = node_ids
            .iter()
            .map(|id| self.node(id).cloned().ok_or_else(|| DiagramError::unknown_node(*id)))
            .collect::<Result<_>>()?;
        let source_links: Vec<Link> = self
            .links
            .iter()
            .filter(|l| node_ids.contains(&l.from_node_id.as_str()) && node_ids.contains(&l.to_node_id.as_str()))
            .cloned()
            .collect();

        let offset = self.config.paste_offset;
        let mut renamed: HashMap<String, String> = HashMap::new();
        let mut created = Vec::with_capacity(sources.len());

        for source in sources {
            let id = self.ids.next_node_id();
            renamed.insert(source.id.clone(), id.clone());
            created.push(id.clone());
            self.nodes.push(DiagramNode {
                id,
                x: source.x + offset,
                y: source.y + offset,
                ..source
            });
        }

        for source in source_links {
            if let (Some(from), Some(to)) = (renamed.get(&source.from_node_id), renamed.get(&source.to_node_id)) {
                let link = Link {
                    id: self.ids.next_link_id(),
                    from_node_id: from.clone(),
                    to_node_id: to.clone(),
                    ..source
                };
                self.links.push(link);
            }
        }

        debug!(nodes = created.len(), "pasted nodes");
        Ok(created)
    }

    /// Reset to an empty diagram with a fresh ground and id counters
    pub fn clear(&mut self, palette: &Palette) {
        let config = self.config.clone();
        *self = Self::with_palette(palette).with_config(config);
    }
}

/// Numeric part of a solide id as text (`"s12"` -> `"12"`)
fn solide_number(id: &str) -> &str {
    id.strip_prefix('s').unwrap_or(id)
}
