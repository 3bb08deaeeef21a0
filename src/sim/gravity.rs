//! Planet gravity
//!
//! Each planet pulls only inside its influence zone (radius ×
//! `OUT_OF_BOUNDS_RADIUS_FACTOR`). Leaving every zone ends the run, so the
//! same zone test doubles as the play-area check.

use glam::Vec2;

use super::state::Planet;
use crate::consts::*;
use crate::settings::GravityMode;

/// Gravitational pull magnitude at `dist` from a planet's centre.
///
/// Never negative. A non-positive or non-finite distance yields 0 in every
/// mode so callers never divide by zero downstream.
pub fn gravity_force(dist: f32, gravity_factor: f32, mode: GravityMode, speed_regulator: f32) -> f32 {
    if !dist.is_finite() || dist <= 0.0 {
        return 0.0;
    }
    let speed_factor = speed_regulator * speed_regulator;
    let base = match mode {
        GravityMode::Realistic => G_REALISTIC / (dist * dist + GRAVITY_SOFTENING),
        GravityMode::Linear => G_LINEAR / dist,
        GravityMode::Constant => G_CONSTANT,
    };
    (base * gravity_factor * speed_factor).max(0.0)
}

/// Speed of a circular orbit at `dist`, where pull equals v²/r
pub fn stable_orbit_speed(dist: f32, gravity_factor: f32, mode: GravityMode, speed_regulator: f32) -> f32 {
    (gravity_force(dist, gravity_factor, mode, speed_regulator) * dist).max(0.0).sqrt()
}

/// Whether `pos` lies strictly inside a planet's influence zone
#[inline]
pub fn in_influence_zone(planet: &Planet, pos: Vec2) -> bool {
    planet.pos.distance(pos) < planet.influence_radius()
}

/// Whether `pos` lies inside any play zone
pub fn inside_play_area(planets: &[Planet], pos: Vec2) -> bool {
    planets.iter().any(|p| in_influence_zone(p, pos))
}

/// Aggregate gravity acting on a body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GravityField {
    /// Summed pull from every planet whose zone contains the body
    pub force: Vec2,
    /// At least one zone contains the body
    pub inside_any_zone: bool,
    /// Index of the planet with the highest force/distance ratio
    pub dominant: Option<usize>,
}

/// Sum planet pulls on a body at `pos`.
///
/// The dominant planet is chosen by force/distance; on equal ratios the
/// earlier planet keeps the title.
pub fn gravity_field(planets: &[Planet], pos: Vec2, mode: GravityMode, speed_regulator: f32) -> GravityField {
    let mut field = GravityField::default();
    let mut best_influence = -1.0_f32;

    for (i, planet) in planets.iter().enumerate() {
        let delta = planet.pos - pos;
        let dist = delta.length();
        if dist >= planet.influence_radius() {
            continue;
        }
        field.inside_any_zone = true;
        if dist <= 0.0 {
            continue;
        }
        let force = gravity_force(dist, planet.gravity_factor, mode, speed_regulator);
        field.force += delta / dist * force;

        let influence = force / dist;
        if influence > best_influence {
            best_influence = influence;
            field.dominant = Some(i);
        }
    }

    field
}
