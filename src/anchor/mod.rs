//! Joint attachment points and how links pick them

pub mod resolve;
pub mod sides;
pub mod table;

pub use resolve::{anchor_to_world, anchor_world_by_index, resolve_anchor, world_anchors};
pub use sides::{map_all_sides, map_sides, SideMapping};
pub use table::{get_anchors, AnchorPoint, Side};
