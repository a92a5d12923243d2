//! Options for the schematic SVG output

/// How a diagram is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Margin added around the extent of markers and links
    pub padding: f64,

    /// Emit the `<?xml ...?>` declaration
    pub standalone: bool,

    /// One element per line, indented by group depth
    pub pretty_print: bool,

    /// Prepended to every CSS class (`ks-link`, `ks-joint`, ...)
    pub class_prefix: Option<String>,

    /// Radius of the two-tone joint marker
    pub marker_radius: f64,

    /// Stroke width of link segments
    pub link_width: f64,

    /// Draw node and link labels
    pub show_labels: bool,

    /// Draw a dot on every anchor of every joint
    pub show_anchors: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("ks-".to_string()),
            marker_radius: 8.0,
            link_width: 3.0,
            show_labels: true,
            show_anchors: false,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Plain class names (`link`, `joint`, ...)
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    pub fn with_link_width(mut self, width: f64) -> Self {
        self.link_width = width;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn with_anchors(mut self, show: bool) -> Self {
        self.show_anchors = show;
        self
    }

    /// Class name with the configured prefix applied
    pub fn class(&self, name: &str) -> String {
        match &self.class_prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}
