//! Pollution from dust clouds
//!
//! A level carries a baseline; flying through a dust cloud adds exposure
//! that lingers and fades at `POLLUTION_DECAY_RATE` per second after the
//! rocket leaves. The displayed value eases toward the actual one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::DustCloud;
use crate::consts::POLLUTION_DECAY_RATE;
use crate::lerp;

/// How quickly the displayed level chases the actual level (per second)
const DISPLAY_SMOOTHING: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollution {
    /// Level baseline
    pub global: f32,
    /// Baseline plus current local exposure, 0..=1
    pub actual: f32,
    /// Local exposure that decays after leaving a cloud
    pub lingering: f32,
    /// Smoothed value for the HUD
    pub displayed: f32,
}

impl Pollution {
    pub fn new(global: f32) -> Self {
        let actual = global.clamp(0.0, 1.0);
        Self {
            global,
            actual,
            lingering: 0.0,
            displayed: actual,
        }
    }

    /// Advance one step given this frame's exposure from clouds
    pub fn update(&mut self, cloud_exposure: f32, dt: f32) {
        let decayed = (self.lingering - POLLUTION_DECAY_RATE * dt).max(0.0);
        self.lingering = cloud_exposure.max(decayed);
        self.actual = (self.global + self.lingering).clamp(0.0, 1.0);
        let t = (dt * DISPLAY_SMOOTHING).clamp(0.0, 1.0);
        self.displayed = lerp(self.displayed, self.actual, t).clamp(0.0, 1.0);
    }
}

/// Strength multiplier for a cloud at `progress` (0 = fresh, 1 = gone).
///
/// Falls from 1.0 to 0.5 over the first 80% of the cloud's life, then to 0.
pub fn cloud_factor(progress: f32) -> f32 {
    if progress < 0.8 {
        1.0 - (progress / 0.8) * 0.5
    } else {
        let t = (progress - 0.8) / 0.2;
        (0.5 - t * 0.5).max(0.0)
    }
}

/// Total exposure for a rocket at `pos` from every cloud it sits inside
pub fn cloud_exposure(clouds: &[DustCloud], pos: Vec2) -> f32 {
    clouds
        .iter()
        .filter(|cloud| cloud.pos.distance(pos) < cloud.current_radius())
        .map(|cloud| cloud.pollution_amount * cloud_factor(cloud.progress()))
        .sum()
}
