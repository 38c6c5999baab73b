// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the pan/zoom transform between screen pixels and
//! canvas-space coordinates, and nearest-dot hit testing.

use crate::models::dot::Dot;
use egui::{Pos2, Vec2};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
pub const ZOOM_IN_STEP: f32 = 1.25;
pub const ZOOM_OUT_STEP: f32 = 0.8;

/// Pick radius in screen pixels.
pub const HIT_RADIUS_PX: f64 = 10.0;

/// Pan/zoom state for one editing session. Pan is in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub zoom: f32,
    pub pan: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Transform {
    /// Convert a screen position to canvas-space. `origin` is the canvas
    /// widget's top-left corner in screen space.
    pub fn screen_to_canvas(&self, screen: Pos2, origin: Pos2) -> Dot {
        let zoom = f64::from(self.zoom);
        Dot {
            x: (f64::from(screen.x) - f64::from(origin.x) - f64::from(self.pan.x)) / zoom,
            y: (f64::from(screen.y) - f64::from(origin.y) - f64::from(self.pan.y)) / zoom,
        }
    }

    /// Convert a canvas-space point to a screen position (translate, then scale).
    pub fn canvas_to_screen(&self, point: &Dot, origin: Pos2) -> Pos2 {
        Pos2::new(
            origin.x + self.pan.x + point.x as f32 * self.zoom,
            origin.y + self.pan.y + point.y as f32 * self.zoom,
        )
    }

    /// Multiply the zoom by `factor`, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_IN_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(ZOOM_OUT_STEP);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom as a rounded percentage for display.
    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0).round() as i32
    }
}

/// Find the dot nearest to `point` within the pick radius.
///
/// The radius is `HIT_RADIUS_PX / zoom` canvas units, so it stays constant
/// on screen. Equal distances resolve to the lowest index.
pub fn hit_test(dots: &[Dot], point: &Dot, zoom: f32) -> Option<usize> {
    let radius = HIT_RADIUS_PX / zoom as f64;
    let mut best: Option<(usize, f64)> = None;
    for (index, dot) in dots.iter().enumerate() {
        let distance = dot.distance_to(point);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.filter(|&(_, d)| d < radius).map(|(index, _)| index)
}
