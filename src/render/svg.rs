//! SVG serializer for overlay draw commands
//!
//! Each line command becomes a `<line>`, each text command a `<text>`
//! with one `<tspan>` per line. The document is sized to the canvas so
//! it can be laid over a screenshot of the viewport.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::CanvasSize;
use crate::overlay::{DrawCommand, LineCommand, TextCommand};

const SHADOW_FILTER_ID: &str = "scaleoverlay-shadow";

/// Font size in px parsed from a CSS size such as `"14px"`
fn font_px(size: &str) -> f64 {
    size.trim_end_matches("px").trim().parse().unwrap_or(14.0)
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_line(out: &mut String, line: &LineCommand) {
    let style = &line.style;
    let _ = write!(
        out,
        r#"  <line data-id="{}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}""#,
        xml_escape(&line.data_id),
        line.start.x,
        line.start.y,
        line.end.x,
        line.end.y,
        xml_escape(&style.color),
        style.width,
    );
    if !style.dash.is_empty() {
        let _ = write!(out, r#" stroke-dasharray="{}""#, xml_escape(&style.dash));
    }
    if style.shadow {
        let _ = write!(out, r#" filter="url(#{SHADOW_FILTER_ID})""#);
    }
    out.push_str("/>\n");
}

fn write_text(out: &mut String, text: &TextCommand) {
    let style = &text.style;
    let line_height = font_px(&style.font_size) * 1.2;
    let _ = write!(
        out,
        r#"  <text data-id="{}-text" x="{:.2}" y="{:.2}" fill="{}" font-family="{}" font-size="{}""#,
        xml_escape(&text.annotation_uid),
        text.position.x,
        text.position.y,
        xml_escape(&style.color),
        xml_escape(&style.font_family),
        xml_escape(&style.font_size),
    );
    if style.shadow {
        let _ = write!(out, r#" filter="url(#{SHADOW_FILTER_ID})""#);
    }
    out.push_str(">\n");
    for (i, line) in text.lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { line_height };
        let _ = writeln!(
            out,
            r#"    <tspan x="{:.2}" dy="{:.2}">{}</tspan>"#,
            text.position.x,
            dy,
            xml_escape(line)
        );
    }
    out.push_str("  </text>\n");
}

/// Serialize draw commands into a standalone SVG document
pub fn to_svg(canvas: CanvasSize, commands: &[DrawCommand]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    );
    let _ = writeln!(
        out,
        r#"  <defs><filter id="{SHADOW_FILTER_ID}"><feDropShadow dx="0" dy="0" stdDeviation="1" flood-color="black" flood-opacity="0.8"/></filter></defs>"#
    );

    for command in commands {
        match command {
            DrawCommand::Line(line) => write_line(&mut out, line),
            DrawCommand::Text(text) => write_text(&mut out, text),
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Write draw commands to an SVG file
pub fn write_svg(path: &Path, canvas: CanvasSize, commands: &[DrawCommand]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create SVG file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(to_svg(canvas, commands).as_bytes())?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{LineStyle, TextStyle};
    use geo::coord;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> Vec<DrawCommand> {
        vec![
            DrawCommand::Text(TextCommand {
                annotation_uid: "a".to_string(),
                uid: "0".to_string(),
                lines: vec!["5 cm".to_string()],
                position: coord! { x: 10.0, y: 20.0 },
                style: TextStyle::default(),
            }),
            DrawCommand::Line(LineCommand {
                annotation_uid: "a".to_string(),
                uid: "1".to_string(),
                data_id: "a-line".to_string(),
                start: coord! { x: 1.0, y: 2.0 },
                end: coord! { x: 3.5, y: 2.0 },
                style: LineStyle {
                    dash: "4,2".to_string(),
                    shadow: false,
                    ..LineStyle::default()
                },
            }),
        ]
    }

    #[test]
    fn test_svg_contains_elements() {
        let canvas = CanvasSize::new(64, 48).unwrap();
        let svg = to_svg(canvas, &sample());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 64 48""#));
        assert!(svg.contains(r#"x1="1.00" y1="2.00" x2="3.50" y2="2.00""#));
        assert!(svg.contains(r#"stroke-dasharray="4,2""#));
        assert!(svg.contains(">5 cm</tspan>"));
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(xml_escape(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_font_px() {
        assert_eq!(font_px("14px"), 14.0);
        assert_eq!(font_px("9"), 9.0);
        assert_eq!(font_px("large"), 14.0);
    }

    #[test]
    fn test_write_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overlay.svg");
        let canvas = CanvasSize::new(64, 48).unwrap();

        write_svg(&path, canvas, &sample()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_svg(canvas, &sample()));
    }

    #[test]
    fn test_write_svg_bad_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("overlay.svg");
        let canvas = CanvasSize::new(64, 48).unwrap();
        assert!(write_svg(&path, canvas, &sample()).is_err());
    }
}
