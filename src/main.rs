use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use scaleoverlay::config::{FileConfig, OverlayConfig, defaults};
use scaleoverlay::domain::{
    AnnotationStore, Camera, CanvasSize, ImageMetadata, Placement, ViewportContext,
    ViewportCorners,
};
use scaleoverlay::geometry::CornerProjection;
use scaleoverlay::overlay::{RenderedOverlay, ScaleOverlayTool};
use scaleoverlay::render::write_svg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Svg,
}

/// Compute a calibrated scale-bar overlay for a medical image viewport
///
/// Examples:
///   # 300 x 300 mm field of view on a 512 px canvas, bar on top
///   scaleoverlay
///
///   # Zoomed-in view with the bar on the left, written as SVG
///   scaleoverlay --world-width 40 --world-height 40 -p left -f svg -o ruler.svg
///
///   # Use a config file
///   scaleoverlay --config my-overlay.toml
#[derive(Parser, Debug)]
#[command(name = "scaleoverlay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches scaleoverlay.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    canvas_width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    canvas_height: Option<u32>,

    /// Visible world width in mm
    #[arg(long)]
    world_width: Option<f64>,

    /// Visible world height in mm
    #[arg(long)]
    world_height: Option<f64>,

    /// Edge the scale bar is anchored to
    #[arg(short = 'p', long)]
    placement: Option<Placement>,

    /// Viewport id used for the annotation uid
    #[arg(long)]
    viewport_id: Option<String>,

    /// Output format
    #[arg(short = 'f', long, default_value = "json")]
    format: OutputFormat,

    /// Output path (JSON defaults to stdout, SVG to scaleoverlay.svg)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config: FileConfig = file_config.unwrap_or_default();

    let verbose = args.verbose || file_config.verbose;
    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let canvas_width = args
        .canvas_width
        .or(file_config.canvas_width)
        .unwrap_or(defaults::CANVAS_WIDTH);
    let canvas_height = args
        .canvas_height
        .or(file_config.canvas_height)
        .unwrap_or(defaults::CANVAS_HEIGHT);
    let world_width = args
        .world_width
        .or(file_config.world_width)
        .unwrap_or(defaults::WORLD_WIDTH);
    let world_height = args
        .world_height
        .or(file_config.world_height)
        .unwrap_or(defaults::WORLD_HEIGHT);
    let viewport_id = args
        .viewport_id
        .clone()
        .or_else(|| file_config.viewport_id.clone())
        .unwrap_or_else(|| defaults::VIEWPORT_ID.to_string());

    let mut overlay_config = file_config.overlay.clone().unwrap_or_default();
    if let Some(placement) = args.placement {
        overlay_config = overlay_config.with_location(placement);
    }

    if !(world_width.is_finite() && world_height.is_finite())
        || world_width <= 0.0
        || world_height <= 0.0
    {
        bail!(
            "World extent must be positive, got {} x {} mm",
            world_width,
            world_height
        );
    }

    tracing::debug!(
        canvas_width,
        canvas_height,
        world_width,
        world_height,
        placement = %overlay_config.scale_location,
        "configuration"
    );

    let canvas = CanvasSize::new(canvas_width, canvas_height).context("Invalid canvas size")?;
    let ctx = ViewportContext {
        viewport_id,
        camera: Camera::default(),
        corners: ViewportCorners::axis_aligned(world_width, world_height, 0.0),
        canvas,
        frame_of_reference_uid: None,
        image: ImageMetadata::with_spacing(
            world_height / f64::from(canvas_height),
            world_width / f64::from(canvas_width),
        ),
    };

    let rendered = render(&ctx, overlay_config)?;
    let Some(rendered) = rendered else {
        println!(
            "No scale bar fits a {:.1} x {:.1} mm view; nothing to draw.",
            world_width, world_height
        );
        return Ok(());
    };

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rendered)
                .context("Failed to serialize overlay")?;
            let output = args.output.clone().or(file_config.output.clone());
            if let Some(path) = output {
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote {}", path.display());
            } else {
                println!("{json}");
            }
        }
        OutputFormat::Svg => {
            let path = args
                .output
                .clone()
                .or(file_config.output.clone())
                .unwrap_or_else(|| PathBuf::from("scaleoverlay.svg"));
            write_svg(&path, canvas, &rendered.commands).context("Failed to write SVG file")?;
            println!(
                "Wrote {} ({}, {} ticks) to {}",
                rendered.overlay.label,
                rendered.overlay.placement,
                rendered.overlay.inner_ticks.len(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Enable the tool on a single viewport and render one frame
fn render(ctx: &ViewportContext, config: OverlayConfig) -> Result<Option<RenderedOverlay>> {
    let tool = ScaleOverlayTool::new(config).context("Invalid overlay configuration")?;
    let projection =
        CornerProjection::new(&ctx.corners, ctx.canvas).context("Invalid viewport geometry")?;

    let mut store = AnnotationStore::new();
    tool.enable(ctx, &mut store);

    tool.render_annotation(ctx, &store, &projection)
        .context("Failed to compute scale overlay")
}
