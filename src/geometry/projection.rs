use geo::{Coord, coord};

use crate::domain::{CanvasSize, Point3, ViewportCorners};
use crate::domain::viewport::{dot3, sub3};
use crate::error::OverlayError;

/// World-to-canvas projection supplied by the host camera
pub trait WorldToCanvas {
    /// Project a world point (mm) to canvas pixels
    fn world_to_canvas(&self, point: Point3) -> Coord<f64>;
}

impl<F> WorldToCanvas for F
where
    F: Fn(Point3) -> Coord<f64>,
{
    fn world_to_canvas(&self, point: Point3) -> Coord<f64> {
        self(point)
    }
}

/// Affine projection that stretches the visible corner rectangle over the canvas
///
/// Maps top-left to (0, 0), top-right to (width, 0) and bottom-left to
/// (0, height). Points off the view plane are projected orthogonally.
/// This is what a parallel-projection camera does when the image fills
/// the viewport, so it stands in for the host camera outside a viewer.
#[derive(Debug, Clone)]
pub struct CornerProjection {
    origin: Point3,
    u: Point3,
    v: Point3,
    u_len2: f64,
    v_len2: f64,
    width: f64,
    height: f64,
}

impl CornerProjection {
    pub fn new(corners: &ViewportCorners, canvas: CanvasSize) -> Result<Self, OverlayError> {
        canvas.validate()?;
        let u = sub3(corners.top_right, corners.top_left);
        let v = sub3(corners.bottom_left, corners.top_left);
        let u_len2 = dot3(u, u);
        let v_len2 = dot3(v, v);

        if !(u_len2.is_finite() && v_len2.is_finite() && u_len2 > 0.0 && v_len2 > 0.0) {
            return Err(OverlayError::InvalidGeometryInput(
                "viewport corners do not span a plane".to_string(),
            ));
        }

        Ok(Self {
            origin: corners.top_left,
            u,
            v,
            u_len2,
            v_len2,
            width: f64::from(canvas.width),
            height: f64::from(canvas.height),
        })
    }

    /// Canvas pixels per world mm along the horizontal axis
    pub fn pixels_per_mm(&self) -> f64 {
        self.width / self.u_len2.sqrt()
    }
}

impl WorldToCanvas for CornerProjection {
    fn world_to_canvas(&self, point: Point3) -> Coord<f64> {
        let d = sub3(point, self.origin);
        coord! {
            x: dot3(d, self.u) / self.u_len2 * self.width,
            y: dot3(d, self.v) / self.v_len2 * self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_land_on_canvas_corners() {
        let corners = ViewportCorners::axis_aligned(200.0, 100.0, 3.0);
        let canvas = CanvasSize::new(800, 400).unwrap();
        let proj = CornerProjection::new(&corners, canvas).unwrap();

        let tl = proj.world_to_canvas(corners.top_left);
        let br = proj.world_to_canvas(corners.bottom_right);
        assert!(tl.x.abs() < 1e-9 && tl.y.abs() < 1e-9);
        assert!((br.x - 800.0).abs() < 1e-9);
        assert!((br.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_projects_to_canvas_center() {
        let corners = ViewportCorners::axis_aligned(200.0, 100.0, 0.0);
        let canvas = CanvasSize::new(800, 400).unwrap();
        let proj = CornerProjection::new(&corners, canvas).unwrap();

        let c = proj.world_to_canvas(corners.center());
        assert!((c.x - 400.0).abs() < 1e-9);
        assert!((c.y - 200.0).abs() < 1e-9);
        assert!((proj.pixels_per_mm() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_degenerate_corners() {
        let corners = ViewportCorners::axis_aligned(0.0, 100.0, 0.0);
        let canvas = CanvasSize::new(800, 400).unwrap();
        assert!(CornerProjection::new(&corners, canvas).is_err());
    }

    #[test]
    fn test_closure_projection() {
        let proj = |p: Point3| coord! { x: p[0] * 2.0, y: p[1] * 2.0 };
        let c = proj.world_to_canvas([1.0, 2.0, 0.0]);
        assert_eq!(c, coord! { x: 2.0, y: 4.0 });
    }
}
