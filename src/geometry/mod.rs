pub mod bounds;
pub mod label;
pub mod mapping;
pub mod projection;
pub mod selection;
pub mod ticks;

pub use bounds::{ScaleBounds, compute_scale_bounds};
pub use label::{LengthUnit, ScaleLabel, format_scale_label};
pub use mapping::{compute_canvas_scale_coordinates, project_scale_endpoints};
pub use projection::{CornerProjection, WorldToCanvas};
pub use selection::{SCALE_CANDIDATES_MM, largest_candidate_within, select_scale_size};
pub use ticks::{
    EndTicks, InnerTick, TickKind, TickLengths, compute_end_scale_ticks, compute_inner_scale_ticks,
    tick_offset_for,
};
