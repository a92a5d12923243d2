//! Crate-level error type for the load / analyze / render pipeline

use thiserror::Error;

use crate::diagram::DiagramError;
use crate::document::DocumentError;
use crate::palette::PaletteError;

#[derive(Debug, Error)]
pub enum KinesketchError {
    /// Error while reading or validating a document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Error while loading a palette
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Error from an editing operation
    #[error("diagram error: {0}")]
    Diagram(#[from] DiagramError),
}

pub type Result<T> = std::result::Result<T, KinesketchError>;
