pub mod commands;
pub mod pipeline;
pub mod tool;

pub use commands::{DrawCommand, LineCommand, LineStyle, OverlayStyle, TextCommand, TextStyle};
pub use pipeline::{ScaleOverlay, compute_overlay};
pub use tool::{RenderedOverlay, ScaleOverlayTool, TOOL_NAME, on_camera_changed, on_enabled};
