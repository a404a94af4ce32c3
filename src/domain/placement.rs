use geo::{Coord, coord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge of the viewport the scale bar is anchored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// Axis the bar itself runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Placement {
    pub fn orientation(self) -> Orientation {
        match self {
            Placement::Top | Placement::Bottom => Orientation::Horizontal,
            Placement::Left | Placement::Right => Orientation::Vertical,
        }
    }

    /// True when the bar hugs the far edge (bottom or right) of the canvas
    pub fn is_far_edge(self) -> bool {
        matches!(self, Placement::Bottom | Placement::Right)
    }

    /// Unit vector along the bar, pointing from its first point to its second
    pub fn along(self) -> Coord<f64> {
        match self.orientation() {
            Orientation::Horizontal => coord! { x: 1.0, y: 0.0 },
            Orientation::Vertical => coord! { x: 0.0, y: 1.0 },
        }
    }

    /// Unit vector perpendicular to the bar, pointing into the canvas
    ///
    /// Canvas y grows downwards, so a bar on the top edge has its ticks
    /// hanging towards +y.
    pub fn inward(self) -> Coord<f64> {
        match self {
            Placement::Top => coord! { x: 0.0, y: 1.0 },
            Placement::Bottom => coord! { x: 0.0, y: -1.0 },
            Placement::Left => coord! { x: 1.0, y: 0.0 },
            Placement::Right => coord! { x: -1.0, y: 0.0 },
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
            Placement::Right => "right",
        };
        f.write_str(name)
    }
}
