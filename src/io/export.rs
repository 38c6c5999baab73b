// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project export to JSON, SVG and PNG.
//!
//! All three formats share one bounds computation. PNG export rasterizes
//! the SVG output and runs on a background thread; its result arrives over
//! a channel.

use crate::models::dot::{label_for, Dot};
use crate::models::project::Project;
use anyhow::{Context, Result};
use resvg::{tiny_skia, usvg};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};

/// Padding added around the dots on every side.
pub const EXPORT_PADDING: f64 = 20.0;

/// Largest PNG side in pixels. Wider drawings are scaled down to fit.
pub const MAX_PNG_SIDE: u32 = 16384;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Svg => "SVG",
            ExportFormat::Png => "PNG",
        }
    }
}

/// `<name or "project">.<ext>`
pub fn file_name(project: &Project, format: ExportFormat) -> String {
    format!("{}.{}", project.file_stem(), format.extension())
}

/// Styling applied to SVG/PNG output.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub show_lines: bool,
    pub show_numbers: bool,
    pub dot_size: f64,
    pub line_thickness: f64,
    pub dot_color: String,
    pub line_color: String,
}

impl ExportOptions {
    pub fn from_project(project: &Project) -> Self {
        Self {
            show_lines: project.show_lines,
            show_numbers: true,
            dot_size: project.dot_size,
            line_thickness: project.line_thickness,
            dot_color: project.dot_color.clone(),
            line_color: project.line_color.clone(),
        }
    }
}

/// Export area in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn view_box(&self) -> String {
        format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// Bounding box of `dots` padded on every side, or `0 0 100 100` when
/// there are none.
pub fn padded_bounds(dots: &[Dot]) -> Bounds {
    if dots.is_empty() {
        return Bounds {
            min_x: 0.0,
            min_y: 0.0,
            width: 100.0,
            height: 100.0,
        };
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for dot in dots {
        min_x = min_x.min(dot.x);
        min_y = min_y.min(dot.y);
        max_x = max_x.max(dot.x);
        max_y = max_y.max(dot.y);
    }

    Bounds {
        min_x: min_x - EXPORT_PADDING,
        min_y: min_y - EXPORT_PADDING,
        width: max_x - min_x + EXPORT_PADDING * 2.0,
        height: max_y - min_y + EXPORT_PADDING * 2.0,
    }
}

/// Pretty-printed project record.
pub fn to_json_string(project: &Project) -> Result<String> {
    serde_json::to_string_pretty(project).context("Failed to serialize project")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Connecting path data, `M x y L x y ...` in dot order.
pub fn path_data(dots: &[Dot]) -> String {
    dots.iter()
        .enumerate()
        .map(|(i, d)| format!("{} {} {}", if i == 0 { 'M' } else { 'L' }, d.x, d.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the project as a standalone SVG document.
pub fn to_svg_string(project: &Project, options: &ExportOptions) -> String {
    let bounds = padded_bounds(&project.dots);
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" width="{}" height="{}">"#,
        bounds.view_box(),
        bounds.width,
        bounds.height
    );

    if options.show_lines && project.dots.len() > 1 {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" stroke="{}" stroke-width="{}" fill="none" />"#,
            path_data(&project.dots),
            escape_xml(&options.line_color),
            options.line_thickness
        );
    }

    let dot_color = escape_xml(&options.dot_color);
    for (index, dot) in project.dots.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" />"#,
            dot.x, dot.y, options.dot_size, dot_color
        );
        if options.show_numbers {
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="white" text-anchor="middle" dy=".3em">{}</text>"#,
                dot.x,
                dot.y,
                label_for(index)
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize the SVG export into PNG bytes sized to the padded bounds,
/// scaled down uniformly when a side would exceed [`MAX_PNG_SIDE`].
pub fn to_png_bytes(project: &Project, options: &ExportOptions) -> Result<Vec<u8>> {
    let svg = to_svg_string(project, options);
    let bounds = padded_bounds(&project.dots);

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&svg, &opt).context("Failed to parse generated SVG")?;

    let scale = (f64::from(MAX_PNG_SIDE) / bounds.width.max(bounds.height)).min(1.0);
    let width = ((bounds.width * scale).ceil() as u32).clamp(1, MAX_PNG_SIDE);
    let height = ((bounds.height * scale).ceil() as u32).clamp(1, MAX_PNG_SIDE);
    if scale < 1.0 {
        log::warn!(
            "Scaling PNG export by {:.4} to fit {}x{}",
            scale,
            width,
            height
        );
    }
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {}x{} pixmap", width, height))?;

    let mut pixmap_mut = pixmap.as_mut();
    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap_mut);

    pixmap.encode_png().context("Failed to encode PNG")
}

/// Start a PNG export on a background thread. The receiver yields exactly
/// one result once rasterization finishes.
pub fn spawn_png_export(project: Project, options: ExportOptions) -> Receiver<Result<Vec<u8>>> {
    let (sender, receiver) = channel();
    std::thread::spawn(move || {
        let result = to_png_bytes(&project, &options);
        let _ = sender.send(result);
    });
    receiver
}

/// Serialize the project in `format` (SVG/JSON only; PNG is deferred).
pub fn to_text(project: &Project, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json_string(project),
        ExportFormat::Svg => Ok(to_svg_string(project, &ExportOptions::from_project(project))),
        ExportFormat::Png => anyhow::bail!("PNG export is not a text format"),
    }
}

/// Write exported content to disk.
pub fn write_export(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))
}
