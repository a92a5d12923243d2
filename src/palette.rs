//! Color palette for rigid bodies and diagram ink
//!
//! New solides take their color from a cycling list, the ground taking the
//! first entry. Palettes are authored in TOML so classrooms can ship their own
//! color conventions:
//!
//! ```toml
//! solides = ["#6b7280", "#2563eb", "#dc2626"]
//!
//! [metadata]
//! name = "Classroom"
//!
//! [colors]
//! link-default = "#4b5563"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("cannot read palette: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid palette TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("palette defines no solide colors")]
    EmptySolideColors,
}

/// Gray ground followed by saturated body colors
const DEFAULT_SOLIDES: [&str; 10] = [
    "#6b7280", "#2563eb", "#dc2626", "#16a34a", "#d97706", "#9333ea", "#0891b2", "#e11d48",
    "#65a30d", "#7c3aed",
];

/// Ink tokens every palette falls back on
const DEFAULT_INK: [(&str, &str); 6] = [
    ("anchor", "#f59e0b"),
    ("background", "#ffffff"),
    ("ink", "#1f2937"),
    ("label", "#374151"),
    ("link-default", "#4b5563"),
    ("selection", "#2563eb"),
];

/// Used for tokens no palette defines
const FALLBACK_INK: &str = "#333333";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaletteInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Solide color cycle plus named ink colors
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Palette {
    #[serde(default)]
    pub metadata: PaletteInfo,
    /// Never empty; index 0 is the ground
    pub solides: Vec<String>,
    /// CSS token name to hex color, kept sorted
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl Palette {
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        Self::from_str(&std::fs::read_to_string(path)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let palette: Palette = toml::from_str(content)?;
        if palette.solides.is_empty() {
            return Err(PaletteError::EmptySolideColors);
        }
        Ok(palette)
    }

    /// Color for the solide with the given creation index, cycling
    pub fn solide_color(&self, index: u64) -> &str {
        let slot = index % self.solides.len() as u64;
        &self.solides[slot as usize]
    }

    pub fn ground_color(&self) -> &str {
        self.solide_color(0)
    }

    /// Color defined by this palette for `token`
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(String::as_str)
    }

    /// Like [`Palette::resolve`], falling back on the built-in ink colors
    pub fn resolve_or_default(&self, token: &str) -> String {
        self.resolve(token)
            .or_else(|| {
                DEFAULT_INK
                    .iter()
                    .find(|(name, _)| *name == token)
                    .map(|(_, color)| *color)
            })
            .unwrap_or(FALLBACK_INK)
            .to_string()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            metadata: PaletteInfo::default(),
            solides: DEFAULT_SOLIDES.iter().map(|c| c.to_string()).collect(),
            colors: DEFAULT_INK
                .iter()
                .map(|(token, color)| (token.to_string(), color.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.solides.len(), 10);
        assert_eq!(palette.ground_color(), "#6b7280");
        assert_eq!(palette.resolve("ink"), Some("#1f2937"));
        assert_eq!(palette.metadata, PaletteInfo::default());
    }

    #[test]
    fn test_solide_color_cycles() {
        let palette = Palette::default();
        assert_eq!(palette.solide_color(1), "#2563eb");
        assert_eq!(palette.solide_color(11), "#2563eb");
        assert_eq!(palette.solide_color(10), "#6b7280");
    }

    #[test]
    fn test_unknown_token_uses_fallback_ink() {
        let palette = Palette::default();
        assert_eq!(palette.resolve("nonexistent"), None);
        assert_eq!(palette.resolve_or_default("nonexistent"), FALLBACK_INK);
    }

    #[test]
    fn test_sparse_palette_borrows_default_ink() {
        let sparse = Palette::from_str(r##"solides = ["#000000"]"##).unwrap();
        assert!(sparse.colors.is_empty());
        assert_eq!(sparse.resolve_or_default("anchor"), "#f59e0b");
        assert_eq!(sparse.ground_color(), "#000000");
    }

    #[test]
    fn test_parse_metadata_and_tokens() {
        let palette = Palette::from_str(
            r##"
solides = ["#111111", "#222222"]

[metadata]
name = "Mono"
description = "Print friendly"

[colors]
ink = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(palette.metadata.name.as_deref(), Some("Mono"));
        assert_eq!(palette.metadata.description.as_deref(), Some("Print friendly"));
        assert_eq!(palette.solide_color(3), "#222222");
        assert_eq!(palette.resolve_or_default("ink"), "#000000");
    }

    #[test]
    fn test_rejects_bad_palettes() {
        assert!(matches!(
            Palette::from_str("solides = []"),
            Err(PaletteError::EmptySolideColors)
        ));
        assert!(matches!(
            Palette::from_str("solides = [ {{"),
            Err(PaletteError::Toml(_))
        ));
        assert!(matches!(
            Palette::from_str("[colors]\nink = \"#000\""),
            Err(PaletteError::Toml(_))
        ));
    }
}
