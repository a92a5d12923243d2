//! Planar geometry shared by the anchor resolver, the router and the renderer

pub mod transform;
pub mod types;

pub use transform::{normalize_degrees, RotationTransform};
pub use types::{BoundingBox, Point};
