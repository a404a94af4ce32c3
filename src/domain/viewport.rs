use geo::{Coord, coord};
use serde::{Deserialize, Serialize};

use super::image::ImageMetadata;
use super::placement::{Orientation, Placement};
use crate::error::OverlayError;

/// A point in world space (millimetres)
pub type Point3 = [f64; 3];

pub(crate) fn sub3(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn add3(a: Point3, b: Point3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn scale3(a: Point3, s: f64) -> Point3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub(crate) fn dot3(a: Point3, b: Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn norm3(a: Point3) -> f64 {
    dot3(a, a).sqrt()
}

fn is_finite3(a: Point3) -> bool {
    a.iter().all(|c| c.is_finite())
}

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Result<Self, OverlayError> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.width == 0 || self.height == 0 {
            return Err(OverlayError::InvalidGeometryInput(format!(
                "canvas must have positive dimensions, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> Coord<f64> {
        coord! {
            x: f64::from(self.width) / 2.0,
            y: f64::from(self.height) / 2.0,
        }
    }
}

/// World-space corners of the visible image region, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportCorners {
    pub top_left: Point3,
    pub top_right: Point3,
    pub bottom_left: Point3,
    pub bottom_right: Point3,
}

impl ViewportCorners {
    /// Build from the host's corner array, ordered top-left, top-right,
    /// bottom-left, bottom-right
    pub fn from_array(points: [Point3; 4]) -> Self {
        let [top_left, top_right, bottom_left, bottom_right] = points;
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// An axis-aligned view of `width` x `height` mm centred on the origin
    /// of the plane `z`
    pub fn axis_aligned(width: f64, height: f64, z: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self {
            top_left: [-hw, -hh, z],
            top_right: [hw, -hh, z],
            bottom_left: [-hw, hh, z],
            bottom_right: [hw, hh, z],
        }
    }

    pub fn to_array(&self) -> [Point3; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Mean of the four corners
    pub fn center(&self) -> Point3 {
        let sum = self
            .to_array()
            .into_iter()
            .fold([0.0; 3], add3);
        scale3(sum, 0.25)
    }

    /// Unit world direction the bar runs along for the given placement
    ///
    /// Horizontal bars follow the top edge (left to right), vertical bars
    /// follow the left edge (top to bottom).
    pub fn bar_direction(&self, placement: Placement) -> Result<Point3, OverlayError> {
        let edge = match placement.orientation() {
            Orientation::Horizontal => sub3(self.top_right, self.top_left),
            Orientation::Vertical => sub3(self.bottom_left, self.top_left),
        };
        let len = norm3(edge);
        if !len.is_finite() || len <= 0.0 {
            return Err(OverlayError::InvalidGeometryInput(format!(
                "degenerate viewport edge for {:?} placement",
                placement
            )));
        }
        Ok(scale3(edge, 1.0 / len))
    }

    /// Visible world width and height
    ///
    /// Width is measured along the bottom edge and height along the left
    /// edge. Both must be finite and positive; corners far enough apart to
    /// overflow the edge length are rejected.
    pub fn extent(&self) -> Result<ViewportExtent, OverlayError> {
        if !self.to_array().into_iter().all(is_finite3) {
            return Err(OverlayError::InvalidGeometryInput(
                "viewport corners contain non-finite coordinates".to_string(),
            ));
        }

        let world_width = norm3(sub3(self.bottom_right, self.bottom_left));
        let world_height = norm3(sub3(self.bottom_left, self.top_left));

        if !(world_width.is_finite() && world_height.is_finite())
            || world_width <= 0.0
            || world_height <= 0.0
        {
            return Err(OverlayError::InvalidGeometryInput(format!(
                "visible world extent must be finite and positive, got {}x{}",
                world_width, world_height
            )));
        }

        Ok(ViewportExtent {
            world_width,
            world_height,
        })
    }
}

/// Visible physical size of a viewport in world units (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportExtent {
    pub world_width: f64,
    pub world_height: f64,
}

impl ViewportExtent {
    /// The extent the bar has to fit into: width for top/bottom bars,
    /// height for left/right bars
    pub fn along(&self, placement: Placement) -> f64 {
        match placement.orientation() {
            Orientation::Horizontal => self.world_width,
            Orientation::Vertical => self.world_height,
        }
    }
}

/// Camera orientation vectors reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub view_up: Point3,
    pub view_plane_normal: Point3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            view_up: [0.0, -1.0, 0.0],
            view_plane_normal: [0.0, 0.0, 1.0],
        }
    }
}

/// Everything the host hands over about one viewport for a single trigger
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportContext {
    pub viewport_id: String,
    pub camera: Camera,
    pub corners: ViewportCorners,
    pub canvas: CanvasSize,
    pub frame_of_reference_uid: Option<String>,
    pub image: ImageMetadata,
}
