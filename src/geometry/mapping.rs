use geo::{Coord, coord};

use super::bounds::ScaleBounds;
use super::projection::WorldToCanvas;
use crate::domain::viewport::{add3, scale3};
use crate::domain::{CanvasSize, Orientation, Placement, Point3, ViewportCorners};
use crate::error::OverlayError;

/// World endpoints of a bar of `scale_size` mm centred on the viewport
pub fn scale_endpoints_in_world(
    corners: &ViewportCorners,
    placement: Placement,
    scale_size: u32,
) -> Result<[Point3; 2], OverlayError> {
    let direction = corners.bar_direction(placement)?;
    let center = corners.center();
    let half = scale3(direction, f64::from(scale_size) / 2.0);
    Ok([add3(center, scale3(half, -1.0)), add3(center, half)])
}

/// Project the bar endpoints through the host camera
pub fn project_scale_endpoints<P: WorldToCanvas + ?Sized>(
    corners: &ViewportCorners,
    placement: Placement,
    scale_size: u32,
    projection: &P,
) -> Result<[Coord<f64>; 2], OverlayError> {
    let world = scale_endpoints_in_world(corners, placement, scale_size)?;
    let projected = world.map(|p| projection.world_to_canvas(p));

    if projected.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(OverlayError::InvalidGeometryInput(
            "scale endpoints projected to non-finite canvas coordinates".to_string(),
        ));
    }
    Ok(projected)
}

/// Re-centre the projected bar on the canvas
///
/// Only the pixel length of `projected` is kept. Horizontal bars are
/// centred on `canvas.width / 2` at `bounds.height`, vertical bars on
/// `canvas.height / 2` at `bounds.width`. The first returned point is the
/// left (or top) end.
pub fn compute_canvas_scale_coordinates(
    canvas: CanvasSize,
    projected: [Coord<f64>; 2],
    bounds: ScaleBounds,
    placement: Placement,
) -> [Coord<f64>; 2] {
    let delta = projected[1] - projected[0];
    let half = delta.x.hypot(delta.y) / 2.0;
    let center = canvas.center();

    match placement.orientation() {
        Orientation::Horizontal => [
            coord! { x: center.x - half, y: bounds.height },
            coord! { x: center.x + half, y: bounds.height },
        ],
        Orientation::Vertical => [
            coord! { x: bounds.width, y: center.y - half },
            coord! { x: bounds.width, y: center.y + half },
        ],
    }
}
