// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas pointer state machine.
//!
//! Raw pointer events are fed in screen coordinates and turned into
//! [`CanvasAction`]s. The machine has three states: idle, dragging a dot,
//! and panning. It never mutates the project itself; the caller applies
//! the returned actions.

use crate::models::dot::Dot;
use crate::util::geometry::{hit_test, Transform};
use egui::{PointerButton, Pos2, Vec2};

/// Pointer travel (screen pixels) below which a press on empty canvas
/// counts as a click rather than a pan.
pub const CLICK_SLOP_PX: f32 = 3.0;

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingDot(usize),
    Panning,
}

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    AddDot(Dot),
    MoveDot(usize, Dot),
    DeleteDot(usize),
    Pan(Vec2),
}

/// Pointer tracking for one canvas.
#[derive(Debug, Default)]
pub struct Interaction {
    state: DragState,
    last_pointer: Option<Pos2>,
    pan_travel: f32,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Button pressed over the canvas.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        pos: Pos2,
        origin: Pos2,
        transform: &Transform,
        dots: &[Dot],
    ) -> Option<CanvasAction> {
        if self.state != DragState::Idle {
            return None;
        }
        self.last_pointer = Some(pos);

        let point = transform.screen_to_canvas(pos, origin);
        let hit = hit_test(dots, &point, transform.zoom);

        match button {
            PointerButton::Primary => {
                self.state = match hit {
                    Some(index) => DragState::DraggingDot(index),
                    None => {
                        self.pan_travel = 0.0;
                        DragState::Panning
                    }
                };
                None
            }
            PointerButton::Secondary => hit.map(CanvasAction::DeleteDot),
            _ => None,
        }
    }

    /// Pointer moved anywhere while the canvas owns the gesture.
    pub fn pointer_move(
        &mut self,
        pos: Pos2,
        origin: Pos2,
        transform: &Transform,
    ) -> Option<CanvasAction> {
        let last = self.last_pointer.replace(pos);
        match self.state {
            DragState::DraggingDot(index) => Some(CanvasAction::MoveDot(
                index,
                transform.screen_to_canvas(pos, origin),
            )),
            DragState::Panning => {
                let delta = pos - last.unwrap_or(pos);
                self.pan_travel += delta.length();
                Some(CanvasAction::Pan(delta))
            }
            DragState::Idle => None,
        }
    }

    /// Button released. A primary click that neither dragged a dot nor
    /// panned appends a dot at the release point.
    pub fn pointer_up(
        &mut self,
        button: PointerButton,
        pos: Pos2,
        origin: Pos2,
        transform: &Transform,
    ) -> Option<CanvasAction> {
        let is_click = match self.state {
            DragState::Idle => true,
            DragState::Panning => self.pan_travel < CLICK_SLOP_PX,
            DragState::DraggingDot(_) => false,
        };
        self.reset();

        if is_click && button == PointerButton::Primary {
            Some(CanvasAction::AddDot(transform.screen_to_canvas(pos, origin)))
        } else {
            None
        }
    }

    /// Pointer left the canvas; any gesture ends without reverting.
    pub fn pointer_leave(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.last_pointer = None;
        self.pan_travel = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Pos2 = Pos2::ZERO;

    fn dots() -> Vec<Dot> {
        vec![Dot::new(10.0, 10.0), Dot::new(100.0, 100.0)]
    }

    #[test]
    fn test_primary_on_dot_starts_drag() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        let action = interaction.pointer_down(PointerButton::Primary, Pos2::new(12.0, 10.0), ORIGIN, &t, &dots());
        assert_eq!(action, None);
        assert_eq!(interaction.state(), DragState::DraggingDot(0));
    }

    #[test]
    fn test_drag_moves_dot_live() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        interaction.pointer_down(PointerButton::Primary, Pos2::new(100.0, 100.0), ORIGIN, &t, &dots());
        assert_eq!(
            interaction.pointer_move(Pos2::new(120.0, 90.0), ORIGIN, &t),
            Some(CanvasAction::MoveDot(1, Dot::new(120.0, 90.0)))
        );
        assert_eq!(
            interaction.pointer_move(Pos2::new(130.0, 80.0), ORIGIN, &t),
            Some(CanvasAction::MoveDot(1, Dot::new(130.0, 80.0)))
        );
        assert_eq!(interaction.pointer_up(PointerButton::Primary, Pos2::new(130.0, 80.0), ORIGIN, &t), None);
        assert_eq!(interaction.state(), DragState::Idle);
    }

    #[test]
    fn test_primary_on_empty_starts_pan() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        interaction.pointer_down(PointerButton::Primary, Pos2::new(50.0, 50.0), ORIGIN, &t, &dots());
        assert_eq!(interaction.state(), DragState::Panning);
        assert_eq!(
            interaction.pointer_move(Pos2::new(60.0, 45.0), ORIGIN, &t),
            Some(CanvasAction::Pan(Vec2::new(10.0, -5.0)))
        );
        // Pan is in screen pixels regardless of zoom.
        let zoomed = Transform { zoom: 4.0, ..t };
        assert_eq!(
            interaction.pointer_move(Pos2::new(61.0, 45.0), ORIGIN, &zoomed),
            Some(CanvasAction::Pan(Vec2::new(1.0, 0.0)))
        );
        assert_eq!(interaction.pointer_up(PointerButton::Primary, Pos2::new(61.0, 45.0), ORIGIN, &t), None);
        assert_eq!(interaction.state(), DragState::Idle);
    }

    #[test]
    fn test_click_on_empty_adds_dot() {
        let mut interaction = Interaction::new();
        let t = Transform {
            zoom: 2.0,
            pan: Vec2::new(10.0, 10.0),
        };
        interaction.pointer_down(PointerButton::Primary, Pos2::new(50.0, 50.0), ORIGIN, &t, &[]);
        let action = interaction.pointer_up(PointerButton::Primary, Pos2::new(50.0, 50.0), ORIGIN, &t);
        assert_eq!(action, Some(CanvasAction::AddDot(Dot::new(20.0, 20.0))));
    }

    #[test]
    fn test_click_with_jitter_still_adds_dot() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        interaction.pointer_down(PointerButton::Primary, Pos2::new(50.0, 50.0), ORIGIN, &t, &[]);
        interaction.pointer_move(Pos2::new(51.0, 50.0), ORIGIN, &t);
        let action = interaction.pointer_up(PointerButton::Primary, Pos2::new(51.0, 50.0), ORIGIN, &t);
        assert_eq!(action, Some(CanvasAction::AddDot(Dot::new(51.0, 50.0))));
    }

    #[test]
    fn test_release_without_press_adds_dot() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        let action = interaction.pointer_up(PointerButton::Primary, Pos2::new(5.0, 6.0), ORIGIN, &t);
        assert_eq!(action, Some(CanvasAction::AddDot(Dot::new(5.0, 6.0))));
        assert_eq!(interaction.pointer_up(PointerButton::Secondary, Pos2::new(5.0, 6.0), ORIGIN, &t), None);
    }

    #[test]
    fn test_secondary_on_dot_deletes() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        let action = interaction.pointer_down(PointerButton::Secondary, Pos2::new(101.0, 99.0), ORIGIN, &t, &dots());
        assert_eq!(action, Some(CanvasAction::DeleteDot(1)));
        assert_eq!(interaction.state(), DragState::Idle);
        assert_eq!(interaction.pointer_up(PointerButton::Secondary, Pos2::new(101.0, 99.0), ORIGIN, &t), None);
    }

    #[test]
    fn test_secondary_on_empty_does_nothing() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        let action = interaction.pointer_down(PointerButton::Secondary, Pos2::new(300.0, 300.0), ORIGIN, &t, &dots());
        assert_eq!(action, None);
        assert_eq!(interaction.state(), DragState::Idle);
    }

    #[test]
    fn test_leave_ends_gesture() {
        let mut interaction = Interaction::new();
        let t = Transform::default();
        interaction.pointer_down(PointerButton::Primary, Pos2::new(10.0, 10.0), ORIGIN, &t, &dots());
        interaction.pointer_leave();
        assert_eq!(interaction.state(), DragState::Idle);
        assert_eq!(interaction.pointer_move(Pos2::new(40.0, 40.0), ORIGIN, &t), None);
    }

    #[test]
    fn test_hit_respects_origin_and_zoom() {
        let mut interaction = Interaction::new();
        let t = Transform {
            zoom: 2.0,
            pan: Vec2::ZERO,
        };
        let origin = Pos2::new(100.0, 100.0);
        // Dot (10,10) sits at screen (120,120); 15px away is outside the 10px radius.
        interaction.pointer_down(PointerButton::Primary, Pos2::new(135.0, 120.0), origin, &t, &dots());
        assert_eq!(interaction.state(), DragState::Panning);
        interaction.pointer_leave();
        interaction.pointer_down(PointerButton::Primary, Pos2::new(128.0, 120.0), origin, &t, &dots());
        assert_eq!(interaction.state(), DragState::DraggingDot(0));
    }
}
