use geo::{Coord, Line};
use serde::Serialize;

use super::commands::{DrawCommand, LineCommand, OverlayStyle, TextCommand};
use crate::config::OverlayConfig;
use crate::domain::{CanvasSize, Placement, ViewportCorners};
use crate::error::OverlayError;
use crate::geometry::{
    EndTicks, InnerTick, ScaleLabel, WorldToCanvas, compute_canvas_scale_coordinates,
    compute_end_scale_ticks, compute_inner_scale_ticks, compute_scale_bounds,
    project_scale_endpoints, select_scale_size,
};

/// Complete geometry of one scale bar in canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleOverlay {
    pub annotation_uid: String,
    pub placement: Placement,
    /// Bar length in mm
    pub scale_size: u32,
    pub label: ScaleLabel,
    pub label_position: Coord<f64>,
    pub bar: Line<f64>,
    pub end_ticks: EndTicks,
    pub inner_ticks: Vec<InnerTick>,
}

/// Run the full scale-bar pipeline for one viewport
///
/// # Arguments
/// * `annotation_uid` - Uid the tick ids are derived from
/// * `corners` - World corners of the visible region
/// * `canvas` - Canvas size in pixels
/// * `placement` - Edge the bar sits on
/// * `projection` - Host world-to-canvas transform
/// * `config` - Margins, tick lengths and label offsets
///
/// # Returns
/// * `Err(NoApplicableScale)` when no candidate length fits the view; the
///   caller should draw nothing. Any other error is fatal, including a
///   config that fails [`OverlayConfig::validate`].
pub fn compute_overlay<P: WorldToCanvas + ?Sized>(
    annotation_uid: &str,
    corners: &ViewportCorners,
    canvas: CanvasSize,
    placement: Placement,
    projection: &P,
    config: &OverlayConfig,
) -> Result<ScaleOverlay, OverlayError> {
    config.validate()?;
    canvas.validate()?;
    let extent = corners.extent()?;

    let world_length = extent.along(placement);
    let scale_size = select_scale_size(&extent, placement)
        .ok_or(OverlayError::NoApplicableScale { world_length })?;

    let bounds = compute_scale_bounds(
        canvas,
        config.horizontal_reduction,
        config.vertical_reduction,
        placement,
    );
    let projected = project_scale_endpoints(corners, placement, scale_size, projection)?;
    let bar = compute_canvas_scale_coordinates(canvas, projected, bounds, placement);

    let end_ticks = compute_end_scale_ticks(bar, placement, config.end_tick_length);
    let inner_ticks = compute_inner_scale_ticks(
        scale_size,
        placement,
        annotation_uid,
        &end_ticks.end_tick1,
        &end_ticks.end_tick2,
        config.tick_lengths(),
    );

    // Anchored at the far (right or bottom) end of the bar
    let label_position =
        bar[1] - placement.along() * config.label_lead + placement.inward() * config.label_gap;

    tracing::debug!(
        world_length,
        scale_size,
        bar_px = bar[1].x - bar[0].x + bar[1].y - bar[0].y,
        ticks = inner_ticks.len(),
        "computed scale overlay"
    );

    Ok(ScaleOverlay {
        annotation_uid: annotation_uid.to_string(),
        placement,
        scale_size,
        label: ScaleLabel::for_scale_size(scale_size),
        label_position,
        bar: Line::new(bar[0], bar[1]),
        end_ticks,
        inner_ticks,
    })
}

impl ScaleOverlay {
    /// Text lines of the label box
    pub fn text_lines(&self) -> Vec<String> {
        vec![self.label.to_string()]
    }

    /// Draw commands in paint order: label, bar, end ticks, interior ticks
    pub fn draw_commands(&self, style: &OverlayStyle) -> Vec<DrawCommand> {
        let uid = &self.annotation_uid;
        let line = |element_uid: &str, data_id: String, segment: &Line<f64>| {
            DrawCommand::Line(LineCommand {
                annotation_uid: uid.clone(),
                uid: element_uid.to_string(),
                data_id,
                start: segment.start,
                end: segment.end,
                style: style.line.clone(),
            })
        };

        let mut commands = Vec::with_capacity(4 + self.inner_ticks.len());
        commands.push(DrawCommand::Text(TextCommand {
            annotation_uid: uid.clone(),
            uid: "0".to_string(),
            lines: self.text_lines(),
            position: self.label_position,
            style: style.text.clone(),
        }));
        commands.push(line("1", format!("{uid}-line"), &self.bar));
        commands.push(line("2", format!("{uid}-left"), &self.end_ticks.end_tick1));
        commands.push(line("3", format!("{uid}-right"), &self.end_ticks.end_tick2));
        commands.extend(
            self.inner_ticks
                .iter()
                .map(|tick| line(&tick.uid, tick.id.clone(), &tick.segment)),
        );
        commands
    }
}
