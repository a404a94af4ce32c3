use serde::Serialize;

use super::commands::DrawCommand;
use super::pipeline::{ScaleOverlay, compute_overlay};
use crate::config::OverlayConfig;
use crate::domain::{AnnotationMetadata, AnnotationState, AnnotationStore, ViewportContext};
use crate::error::OverlayError;
use crate::geometry::WorldToCanvas;

pub const TOOL_NAME: &str = "ScaleOverlay";

const ANNOTATION_UID_PREFIX: &str = "scaleoverlay";

fn annotation_uid_for(viewport_id: &str) -> String {
    format!("{ANNOTATION_UID_PREFIX}-{viewport_id}")
}

fn metadata_for(ctx: &ViewportContext) -> AnnotationMetadata {
    AnnotationMetadata {
        tool_name: TOOL_NAME.to_string(),
        view_plane_normal: ctx.camera.view_plane_normal,
        view_up: ctx.camera.view_up,
        frame_of_reference_uid: ctx.frame_of_reference_uid.clone(),
        referenced_image_id: None,
    }
}

/// Fresh overlay record for a viewport the tool was just enabled on
pub fn on_enabled(ctx: &ViewportContext) -> AnnotationState {
    AnnotationState {
        annotation_uid: annotation_uid_for(&ctx.viewport_id),
        viewport_id: ctx.viewport_id.clone(),
        metadata: metadata_for(ctx),
        corners: ctx.corners,
    }
}

/// Record after a camera change: same uid, current corners and camera vectors
pub fn on_camera_changed(ctx: &ViewportContext, previous: &AnnotationState) -> AnnotationState {
    AnnotationState {
        annotation_uid: previous.annotation_uid.clone(),
        viewport_id: ctx.viewport_id.clone(),
        metadata: metadata_for(ctx),
        corners: ctx.corners,
    }
}

/// Result of a successful render: geometry plus the host draw commands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedOverlay {
    pub overlay: ScaleOverlay,
    pub commands: Vec<DrawCommand>,
}

/// Scale overlay annotation tool
///
/// Holds configuration only. Per-viewport state lives in the caller's
/// [`AnnotationStore`].
#[derive(Debug, Clone)]
pub struct ScaleOverlayTool {
    config: OverlayConfig,
}

impl ScaleOverlayTool {
    pub fn new(config: OverlayConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Handle the host's "tool enabled" trigger
    ///
    /// Reuses the existing record's uid if the viewport already has one.
    pub fn enable<'a>(
        &self,
        ctx: &ViewportContext,
        store: &'a mut AnnotationStore,
    ) -> &'a AnnotationState {
        self.refresh(ctx, store)
    }

    /// Handle the host's "camera modified" trigger
    pub fn camera_modified<'a>(
        &self,
        ctx: &ViewportContext,
        store: &'a mut AnnotationStore,
    ) -> &'a AnnotationState {
        self.refresh(ctx, store)
    }

    fn refresh<'a>(
        &self,
        ctx: &ViewportContext,
        store: &'a mut AnnotationStore,
    ) -> &'a AnnotationState {
        let state = match store.get(&ctx.viewport_id) {
            Some(previous) => on_camera_changed(ctx, previous),
            None => on_enabled(ctx),
        };
        store.upsert(state)
    }

    /// Compute the overlay for one frame
    ///
    /// Returns `Ok(None)` when nothing should be drawn: the tool is not
    /// enabled on the viewport, pixel spacing is missing, or no scale
    /// length fits the current zoom. Fatal input errors are returned so
    /// the host can handle them; no partial geometry is produced.
    pub fn render_annotation<P: WorldToCanvas + ?Sized>(
        &self,
        ctx: &ViewportContext,
        store: &AnnotationStore,
        projection: &P,
    ) -> Result<Option<RenderedOverlay>, OverlayError> {
        let Some(state) = store.get(&ctx.viewport_id) else {
            tracing::debug!(viewport_id = %ctx.viewport_id, "scale overlay not enabled on viewport");
            return Ok(None);
        };

        // Spacing only gates rendering; bar length comes from the world corners
        if let Err(e) = ctx.image.resolve_pixel_spacing(&ctx.viewport_id) {
            tracing::warn!(error = %e, "skipping scale overlay");
            return Ok(None);
        }

        let result = compute_overlay(
            &state.annotation_uid,
            &state.corners,
            ctx.canvas,
            self.config.scale_location,
            projection,
            &self.config,
        );

        match result {
            Ok(overlay) => {
                let commands = overlay.draw_commands(&self.config.style);
                Ok(Some(RenderedOverlay { overlay, commands }))
            }
            Err(e) if !e.is_fatal() => {
                tracing::debug!(viewport_id = %ctx.viewport_id, reason = %e, "no scale overlay this frame");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Camera, CanvasSize, ImageMetadata, Placement, ViewportCorners};
    use crate::geometry::CornerProjection;

    fn context(viewport_id: &str, world: f64) -> ViewportContext {
        ViewportContext {
            viewport_id: viewport_id.to_string(),
            camera: Camera::default(),
            corners: ViewportCorners::axis_aligned(world, world, 0.0),
            canvas: CanvasSize::new(512, 512).unwrap(),
            frame_of_reference_uid: Some("1.2.840.1".to_string()),
            image: ImageMetadata::with_spacing(0.5, 0.5),
        }
    }

    fn projection(ctx: &ViewportContext) -> CornerProjection {
        CornerProjection::new(&ctx.corners, ctx.canvas).unwrap()
    }

    #[test]
    fn test_on_enabled_builds_record() {
        let ctx = context("CT_AXIAL", 300.0);
        let state = on_enabled(&ctx);
        assert_eq!(state.annotation_uid, "scaleoverlay-CT_AXIAL");
        assert_eq!(state.metadata.tool_name, TOOL_NAME);
        assert_eq!(state.metadata.frame_of_reference_uid.as_deref(), Some("1.2.840.1"));
        assert_eq!(state.corners, ctx.corners);
    }

    #[test]
    fn test_camera_change_keeps_uid() {
        let ctx = context("CT_AXIAL", 300.0);
        let mut previous = on_enabled(&ctx);
        previous.annotation_uid = "custom".to_string();

        let mut zoomed = context("CT_AXIAL", 120.0);
        zoomed.camera.view_up = [0.0, 0.0, 1.0];
        let next = on_camera_changed(&zoomed, &previous);

        assert_eq!(next.annotation_uid, "custom");
        assert_eq!(next.corners, zoomed.corners);
        assert_eq!(next.metadata.view_up, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_render_requires_enable() {
        let tool = ScaleOverlayTool::new(OverlayConfig::default()).unwrap();
        let store = AnnotationStore::new();
        let ctx = context("vp", 300.0);
        assert_eq!(tool.render_annotation(&ctx, &store, &projection(&ctx)), Ok(None));
    }

    #[test]
    fn test_render_after_enable() {
        let tool = ScaleOverlayTool::new(OverlayConfig::default()).unwrap();
        let mut store = AnnotationStore::new();
        let ctx = context("vp", 300.0);
        tool.enable(&ctx, &mut store);

        let rendered = tool
            .render_annotation(&ctx, &store, &projection(&ctx))
            .unwrap()
            .unwrap();
        assert_eq!(rendered.overlay.scale_size, 100);
        assert_eq!(rendered.commands.len(), 13);
    }

    #[test]
    fn test_render_uses_cached_corners() {
        let tool = ScaleOverlayTool::new(OverlayConfig::default()).unwrap();
        let mut store = AnnotationStore::new();
        tool.enable(&context("vp", 300.0), &mut store);

        // The host reports new corners but has not fired a camera event yet
        let stale = context("vp", 1000.0);
        let rendered = tool
            .render_annotation(&stale, &store, &projection(&stale))
            .unwrap()
            .unwrap();
        assert_eq!(rendered.overlay.scale_size, 100);

        tool.camera_modified(&stale, &mut store);
        let rendered = tool
            .render_annotation(&stale, &store, &projection(&stale))
            .unwrap()
            .unwrap();
        assert_eq!(rendered.overlay.scale_size, 500);
        assert_eq!(rendered.overlay.annotation_uid, "scaleoverlay-vp");
    }

    #[test]
    fn test_missing_spacing_skips_frame() {
        let tool = ScaleOverlayTool::new(OverlayConfig::default()).unwrap();
        let mut store = AnnotationStore::new();
        let mut ctx = context("vp", 300.0);
        ctx.image = ImageMetadata::default();
        tool.enable(&ctx, &mut store);
        assert_eq!(tool.render_annotation(&ctx, &store, &projection(&ctx)), Ok(None));
    }

    #[test]
    fn test_no_applicable_scale_skips_frame() {
        let tool = ScaleOverlayTool::new(OverlayConfig::default()).unwrap();
        let mut store = AnnotationStore::new();
        let ctx = context("vp", 4.0);
        tool.enable(&ctx, &mut store);
        assert_eq!(tool.render_annotation(&ctx, &store, &projection(&ctx)), Ok(None));
    }

    #[test]
    fn test_fatal_error_propagates() {
        let tool = ScaleOverlayTool::new(OverlayConfig::default()).unwrap();
        let mut store = AnnotationStore::new();
        let mut ctx = context("vp", 300.0);
        let proj = projection(&ctx);
        ctx.canvas = CanvasSize {
            width: 512,
            height: 0,
        };
        tool.enable(&ctx, &mut store);
        assert!(matches!(
            tool.render_annotation(&ctx, &store, &proj),
            Err(OverlayError::InvalidGeometryInput(_))
        ));
    }

    #[test]
    fn test_tool_rejects_invalid_config() {
        let config = OverlayConfig {
            horizontal_reduction: 0.0,
            ..OverlayConfig::default()
        };
        assert!(ScaleOverlayTool::new(config).is_err());
    }

    #[test]
    fn test_location_from_config() {
        let config = OverlayConfig::default().with_location(Placement::Left);
        let tool = ScaleOverlayTool::new(config).unwrap();
        let mut store = AnnotationStore::new();
        let ctx = context("vp", 300.0);
        tool.enable(&ctx, &mut store);

        let rendered = tool
            .render_annotation(&ctx, &store, &projection(&ctx))
            .unwrap()
            .unwrap();
        assert_eq!(rendered.overlay.placement, Placement::Left);
        assert_eq!(rendered.overlay.bar.start.x, rendered.overlay.bar.end.x);
    }
}
