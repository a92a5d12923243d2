//! SVG renderer for schematic overviews
//!
//! Joint symbols are drawn as two-tone markers (one color per side) and links
//! as straight segments between their routed anchor points, with CSS classes
//! for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_palette};
