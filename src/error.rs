/// Errors raised while computing a scale overlay.
///
/// Only [`OverlayError::InvalidGeometryInput`] and [`OverlayError::InvalidConfig`]
/// are fatal to a render call. The other variants mean "draw nothing this frame".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    /// No candidate length lies strictly between 20% and 60% of the visible extent.
    #[error("no scale length fits a visible extent of {world_length:.2} mm")]
    NoApplicableScale { world_length: f64 },
    /// Non-finite or non-positive canvas or world dimensions.
    #[error("invalid geometry input: {0}")]
    InvalidGeometryInput(String),
    /// Image metadata carries no usable row/column pixel spacing.
    #[error("pixel spacing unavailable for viewport {viewport_id}")]
    MissingPixelSpacing { viewport_id: String },
    /// Overlay configuration out of range.
    #[error("invalid overlay configuration: {0}")]
    InvalidConfig(String),
}

impl OverlayError {
    /// Whether the error must be propagated to the host instead of skipping the frame
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidGeometryInput(_) | Self::InvalidConfig(_)
        )
    }
}
