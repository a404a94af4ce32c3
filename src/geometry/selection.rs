use crate::domain::{Placement, ViewportExtent};

/// Round physical lengths (mm) a scale bar may show, largest first
pub const SCALE_CANDIDATES_MM: [u32; 9] = [2000, 1000, 500, 250, 100, 50, 25, 10, 5];

/// A candidate must be longer than this share of the visible extent
pub const MIN_EXTENT_FRACTION: f64 = 0.2;
/// ... and shorter than this share
pub const MAX_EXTENT_FRACTION: f64 = 0.6;

/// Largest candidate strictly between 20% and 60% of `world_length`
///
/// Returns `None` when the view is zoomed in or out too far for any
/// candidate to fit.
pub fn largest_candidate_within(world_length: f64) -> Option<u32> {
    let lower = world_length * MIN_EXTENT_FRACTION;
    let upper = world_length * MAX_EXTENT_FRACTION;

    SCALE_CANDIDATES_MM.iter().copied().find(|&candidate| {
        let candidate = f64::from(candidate);
        candidate < upper && candidate > lower
    })
}

/// Pick the bar length for a viewport
///
/// Top/bottom bars are sized against the visible width, left/right bars
/// against the visible height.
pub fn select_scale_size(extent: &ViewportExtent, placement: Placement) -> Option<u32> {
    largest_candidate_within(extent.along(placement))
}
