use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Image-plane metadata module, when the host has one for the current image
///
/// Either spelling of each spacing may be populated depending on the
/// modality; the plain `*_pixel_spacing` field wins when both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePlane {
    #[serde(default)]
    pub row_pixel_spacing: Option<f64>,
    #[serde(default)]
    pub row_image_pixel_spacing: Option<f64>,
    #[serde(default)]
    pub column_pixel_spacing: Option<f64>,
    #[serde(default)]
    pub col_image_pixel_spacing: Option<f64>,
}

/// Per-viewport image metadata handed over by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Spacing of the loaded image data as `[row, column]`
    #[serde(default)]
    pub spacing: Option<[f64; 2]>,
    #[serde(default)]
    pub image_plane: Option<ImagePlane>,
}

/// Physical size of one image pixel in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelSpacing {
    pub row: f64,
    pub column: f64,
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl ImageMetadata {
    pub fn with_spacing(row: f64, column: f64) -> Self {
        Self {
            spacing: Some([row, column]),
            image_plane: None,
        }
    }

    /// Resolve row/column spacing, preferring the image-plane module over
    /// the raw image data spacing
    pub fn resolve_pixel_spacing(&self, viewport_id: &str) -> Result<PixelSpacing, OverlayError> {
        let (mut row, mut column) = match self.spacing {
            Some([r, c]) => (usable(Some(r)), usable(Some(c))),
            None => (None, None),
        };

        if let Some(plane) = &self.image_plane {
            row = usable(plane.row_pixel_spacing).or(usable(plane.row_image_pixel_spacing));
            column = usable(plane.column_pixel_spacing).or(usable(plane.col_image_pixel_spacing));
        }

        match (row, column) {
            (Some(row), Some(column)) => Ok(PixelSpacing { row, column }),
            _ => Err(OverlayError::MissingPixelSpacing {
                viewport_id: viewport_id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_from_image_data() {
        let meta = ImageMetadata::with_spacing(0.7, 0.8);
        let spacing = meta.resolve_pixel_spacing("vp").unwrap();
        assert_eq!(spacing.row, 0.7);
        assert_eq!(spacing.column, 0.8);
    }

    #[test]
    fn test_image_plane_overrides_data_spacing() {
        let meta = ImageMetadata {
            spacing: Some([1.0, 1.0]),
            image_plane: Some(ImagePlane {
                row_pixel_spacing: None,
                row_image_pixel_spacing: Some(0.25),
                column_pixel_spacing: Some(0.5),
                col_image_pixel_spacing: Some(9.0),
            }),
        };
        let spacing = meta.resolve_pixel_spacing("vp").unwrap();
        assert_eq!(spacing.row, 0.25);
        assert_eq!(spacing.column, 0.5);
    }

    #[test]
    fn test_empty_image_plane_is_missing() {
        // The plane module replaces the data spacing even when it is empty
        let meta = ImageMetadata {
            spacing: Some([1.0, 1.0]),
            image_plane: Some(ImagePlane::default()),
        };
        assert_eq!(
            meta.resolve_pixel_spacing("CT_AXIAL"),
            Err(OverlayError::MissingPixelSpacing {
                viewport_id: "CT_AXIAL".to_string()
            })
        );
    }

    #[test]
    fn test_zero_spacing_is_missing() {
        let meta = ImageMetadata::with_spacing(0.0, 1.0);
        assert!(meta.resolve_pixel_spacing("vp").is_err());
        assert!(ImageMetadata::default().resolve_pixel_spacing("vp").is_err());
    }
}
