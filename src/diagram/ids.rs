//! Explicit id allocation for nodes, links and solides

/// Allocates `n<k>`/`l<k>`/`a<k>` ids from a shared counter and `s<k>` ids from a
/// separate solide counter. `s0` is never handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next_id: u64,
    last_solide_index: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            next_id: 1,
            last_solide_index: 0,
        }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_node_id(&mut self) -> String {
        self.next_with_prefix('n')
    }

    pub fn next_link_id(&mut self) -> String {
        self.next_with_prefix('l')
    }

    pub fn next_angle_arc_id(&mut self) -> String {
        self.next_with_prefix('a')
    }

    fn next_with_prefix(&mut self, prefix: char) -> String {
        let id = format!("{}{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    /// Next solide index; the id is `s<index>`
    pub fn next_solide_index(&mut self) -> u64 {
        self.last_solide_index += 1;
        self.last_solide_index
    }

    /// Rebuild counters so freshly generated ids never collide with loaded ones.
    ///
    /// Ids without a numeric suffix are ignored.
    pub fn reseed<'a>(
        item_ids: impl IntoIterator<Item = &'a str>,
        solide_ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let max_item = item_ids.into_iter().filter_map(numeric_suffix).max();
        let max_solide = solide_ids.into_iter().filter_map(numeric_suffix).max();
        Self {
            next_id: max_item.map_or(1, |m| m + 1),
            last_solide_index: max_solide.unwrap_or(0),
        }
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    id.get(1..)?.parse().ok()
}
