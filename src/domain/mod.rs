pub mod annotation;
pub mod image;
pub mod placement;
pub mod viewport;

pub use annotation::{AnnotationMetadata, AnnotationState, AnnotationStore};
pub use image::{ImageMetadata, ImagePlane, PixelSpacing};
pub use placement::{Orientation, Placement};
pub use viewport::{Camera, CanvasSize, Point3, ViewportContext, ViewportCorners, ViewportExtent};
