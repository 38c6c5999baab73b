// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dot data structure.
//!
//! A dot is a single user-placed point in canvas-space. Its position in
//! the owning project's dot list defines both the connection order and
//! the number shown next to it.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
}

impl Dot {
    /// Create a new dot at the given canvas coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Dot) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Displayed number for the dot at `index`.
pub fn label_for(index: usize) -> String {
    (index + 1).to_string()
}
