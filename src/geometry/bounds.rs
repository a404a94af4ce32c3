use serde::Serialize;

use crate::domain::{CanvasSize, Placement};

/// Canvas dimension beyond which margins stop growing (pixels)
pub const MARGIN_CAP_PX: u32 = 1000;

/// Margin-adjusted anchor for the scale bar, in canvas pixels
///
/// `height` is the y coordinate a horizontal (top/bottom) bar sits on,
/// `width` is the x coordinate a vertical (left/right) bar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleBounds {
    pub height: f64,
    pub width: f64,
}

/// Margin in pixels for one canvas dimension
///
/// The fraction applies to at most [`MARGIN_CAP_PX`] pixels so very large
/// canvases don't push the bar far from the edge.
pub fn reduction_margin(fraction: f64, dimension: u32) -> f64 {
    fraction * f64::from(dimension.min(MARGIN_CAP_PX))
}

/// Compute where the bar may sit for a placement
///
/// Top and left placements measure the margin from the near edge, bottom
/// and right from the far edge, so opposite placements mirror each other
/// about the canvas centre.
pub fn compute_scale_bounds(
    canvas: CanvasSize,
    horizontal_reduction: f64,
    vertical_reduction: f64,
    placement: Placement,
) -> ScaleBounds {
    let h_margin = reduction_margin(horizontal_reduction, canvas.width);
    let v_margin = reduction_margin(vertical_reduction, canvas.height);

    if placement.is_far_edge() {
        ScaleBounds {
            height: f64::from(canvas.height) - v_margin,
            width: f64::from(canvas.width) - h_margin,
        }
    } else {
        ScaleBounds {
            height: v_margin,
            width: h_margin,
        }
    }
}
