//! Pointer gesture tracking
//!
//! Turns raw pointer down/move/up signals (CSS pixels, host clock in ms)
//! into the per-tick control state: holding, double-tap-and-hold, and a
//! normalized vertical drag in drag mode.

use glam::Vec2;

use super::tick::TickInput;
use crate::consts::{DOUBLE_TAP_DELAY_MS, MAX_DOUBLE_TAP_DISTANCE};
use crate::settings::ControlMode;

/// Drag distance (share of viewport width) that maps to full throttle
const FULL_THROTTLE_DRAG: f32 = 0.25;

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    thrusting: bool,
    double_tap_hold: bool,
    dragging: bool,
    drag_start: Option<Vec2>,
    drag_current: Option<Vec2>,
    /// Previous press, cleared once it has been used for a double tap
    last_tap: Option<(f64, Vec2)>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, pos: Vec2, now_ms: f64, control_mode: ControlMode) {
        let is_double_tap = self.last_tap.is_some_and(|(time, last_pos)| {
            now_ms - time < DOUBLE_TAP_DELAY_MS && pos.distance(last_pos) < MAX_DOUBLE_TAP_DISTANCE
        });
        if is_double_tap {
            self.double_tap_hold = true;
            self.last_tap = None;
        } else {
            self.last_tap = Some((now_ms, pos));
        }

        if control_mode == ControlMode::Drag {
            self.dragging = true;
            self.drag_start = Some(pos);
            self.drag_current = Some(pos);
        }
        self.thrusting = true;
    }

    pub fn pointer_move(&mut self, pos: Vec2, control_mode: ControlMode) {
        if self.dragging && control_mode == ControlMode::Drag {
            self.drag_current = Some(pos);
        }
    }

    /// Release ends every gesture but keeps the tap history for double taps
    pub fn pointer_up(&mut self) {
        self.thrusting = false;
        self.double_tap_hold = false;
        self.dragging = false;
        self.drag_start = None;
        self.drag_current = None;
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    pub fn is_double_tap_hold(&self) -> bool {
        self.double_tap_hold
    }

    /// Throttle in `[-1, 1]`; dragging up is positive
    pub fn drag_input(&self, viewport_width: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let (start, current) = self.drag_start.zip(self.drag_current)?;
        let full = viewport_width * FULL_THROTTLE_DRAG;
        if !full.is_finite() || full <= 0.0 {
            return None;
        }
        Some((-(current.y - start.y) / full).clamp(-1.0, 1.0))
    }

    pub fn tick_input(&self, viewport_width: f32) -> TickInput {
        TickInput {
            thrusting: self.thrusting,
            double_tap_hold: self.double_tap_hold,
            drag: self.drag_input(viewport_width),
        }
    }
}
