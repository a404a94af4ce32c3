use geo::Coord;
use serde::{Deserialize, Serialize};

fn default_color() -> String {
    "rgb(255, 255, 0)".to_string()
}
fn default_line_width() -> f64 {
    1.0
}
fn default_shadow() -> bool {
    true
}
fn default_font_family() -> String {
    "Helvetica Neue, Helvetica, Arial, sans-serif".to_string()
}
fn default_font_size() -> String {
    "14px".to_string()
}
fn default_text_line_dash() -> String {
    "2,3".to_string()
}
fn default_text_line_width() -> String {
    "1".to_string()
}

/// Stroke style shared by the bar and all ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_line_width")]
    pub width: f64,
    /// SVG dash array, empty for a solid line
    #[serde(default)]
    pub dash: String,
    #[serde(default = "default_shadow")]
    pub shadow: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            width: default_line_width(),
            dash: String::new(),
            shadow: default_shadow(),
        }
    }
}

/// Style of the label text box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    #[serde(default = "default_text_line_dash")]
    pub line_dash: String,
    #[serde(default = "default_text_line_width")]
    pub line_width: String,
    #[serde(default = "default_shadow")]
    pub shadow: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            line_dash: default_text_line_dash(),
            line_width: default_text_line_width(),
            shadow: default_shadow(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    #[serde(default)]
    pub line: LineStyle,
    #[serde(default)]
    pub text: TextStyle,
}

/// A straight stroke for the host drawing layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCommand {
    pub annotation_uid: String,
    /// Element uid, unique within the annotation
    pub uid: String,
    /// Data attribute the host tags the element with
    pub data_id: String,
    pub start: Coord<f64>,
    pub end: Coord<f64>,
    pub style: LineStyle,
}

/// A text box for the host drawing layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextCommand {
    pub annotation_uid: String,
    pub uid: String,
    pub lines: Vec<String>,
    pub position: Coord<f64>,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    Line(LineCommand),
    Text(TextCommand),
}

impl DrawCommand {
    pub fn uid(&self) -> &str {
        match self {
            DrawCommand::Line(line) => &line.uid,
            DrawCommand::Text(text) => &text.uid,
        }
    }
}
