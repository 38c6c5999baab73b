// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas renderer.
//!
//! [`build_scene`] is a pure function of the project and the current
//! transform. It produces a display list in canvas-space units, with stroke
//! widths, radii and font sizes divided by the zoom so they stay constant
//! on screen. [`paint`] clears the canvas and replays the list.

use crate::models::dot::{label_for, Dot};
use crate::models::project::Project;
use crate::util::geometry::Transform;
use egui::{Color32, Pos2, Rect};

/// Label font size in screen pixels.
pub const LABEL_FONT_PX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline {
        points: Vec<Dot>,
        width: f64,
        color: Color32,
    },
    Circle {
        center: Dot,
        radius: f64,
        color: Color32,
    },
    Label {
        center: Dot,
        text: String,
        size: f64,
        color: Color32,
    },
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub transform: Transform,
    pub commands: Vec<DrawCommand>,
}

/// Parse a `#rrggbb` color, falling back to black.
pub fn parse_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::BLACK)
}

/// Format a color as `#rrggbb`.
pub fn format_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Build the display list: connecting line first, then each dot with its number.
pub fn build_scene(project: &Project, transform: &Transform) -> Scene {
    let zoom = transform.zoom as f64;
    let mut commands = Vec::with_capacity(project.dots.len() * 2 + 1);

    if project.show_lines && project.dots.len() >= 2 {
        commands.push(DrawCommand::Polyline {
            points: project.dots.clone(),
            width: project.line_thickness / zoom,
            color: parse_color(&project.line_color),
        });
    }

    let dot_color = parse_color(&project.dot_color);
    for (index, dot) in project.dots.iter().enumerate() {
        commands.push(DrawCommand::Circle {
            center: *dot,
            radius: project.dot_size / zoom,
            color: dot_color,
        });
        commands.push(DrawCommand::Label {
            center: *dot,
            text: label_for(index),
            size: LABEL_FONT_PX / zoom,
            color: Color32::WHITE,
        });
    }

    Scene {
        transform: *transform,
        commands,
    }
}

/// Clear `rect` and draw the scene with the canvas origin at `rect.min`.
pub fn paint(painter: &egui::Painter, rect: Rect, scene: &Scene) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);

    let origin = rect.min;
    let zoom = scene.transform.zoom;
    let to_screen = |dot: &Dot| -> Pos2 { scene.transform.canvas_to_screen(dot, origin) };

    for command in &scene.commands {
        match command {
            DrawCommand::Polyline {
                points,
                width,
                color,
            } => {
                let screen_points: Vec<Pos2> = points.iter().map(to_screen).collect();
                painter.add(egui::Shape::line(
                    screen_points,
                    egui::Stroke::new(*width as f32 * zoom, *color),
                ));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(center), *radius as f32 * zoom, *color);
            }
            DrawCommand::Label {
                center,
                text,
                size,
                color,
            } => {
                painter.text(
                    to_screen(center),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(*size as f32 * zoom),
                    *color,
                );
            }
        }
    }
}
