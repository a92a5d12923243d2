//! Diagram model and editing operations
//!
//! A [`Diagram`] owns the joints, links, rigid bodies and annotations of one
//! sketch together with its id generator. Every mutator validates the ids it
//! receives and reports problems through [`DiagramError`].

pub mod config;
pub mod error;
pub mod ids;
pub mod store;
pub mod types;

pub use config::{snap, DiagramConfig};
pub use error::DiagramError;
pub use ids::IdGenerator;
pub use store::Diagram;
pub use types::{
    AngleArc, DiagramNode, Link, LinkEnd, Solide, DEFAULT_LINK_LABEL_OFFSET,
    DEFAULT_NODE_LABEL_OFFSET, GROUND_SOLIDE_ID,
};
