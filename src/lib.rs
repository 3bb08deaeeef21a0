//! Orbital Guardian - an orbital-physics arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (gravity, rocket flight, entities, collisions, game state)
//! - `session`: Host-facing lifecycle (start/pause/resume/resize/frame/render)
//! - `settings`: Device and general settings
//! - `level`: Level layouts and the built-in catalog
//! - `stats`: Run statistics (best survival time, attempts)

pub mod error;
pub mod level;
pub mod session;
pub mod settings;
pub mod sim;
pub mod stats;

pub use error::ConfigError;
pub use level::LevelConfig;
pub use session::{Renderer, Session};
pub use settings::{ControlMode, DevSettings, GeneralSettings, GravityMode};
pub use stats::Stats;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Logical world width (world height follows the viewport aspect ratio)
    pub const WORLD_WIDTH: f32 = 1000.0;
    /// Pixels per centimetre on a reference display
    pub const PIXELS_PER_CM: f32 = 37.8;

    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Second press within this window (ms) counts as a double tap
    pub const DOUBLE_TAP_DELAY_MS: f64 = 300.0;
    /// Second press within this distance (px) counts as a double tap
    pub const MAX_DOUBLE_TAP_DISTANCE: f32 = PIXELS_PER_CM * 1.5;

    /// Shared gravity scale
    pub const GRAVITY_MULT: f32 = 150.0 * 30.0;
    pub const G_REALISTIC: f32 = 8000.0 * GRAVITY_MULT;
    /// 1200 * sqrt(GRAVITY_MULT)
    pub const G_LINEAR: f32 = 1200.0 * 67.082_04;
    pub const G_CONSTANT: f32 = GRAVITY_MULT;
    /// Added to d² in realistic mode so force stays finite near the centre
    pub const GRAVITY_SOFTENING: f32 = 10_000.0;

    /// Full thrust (before speed regulator scaling)
    pub const THRUST_FORCE: f32 = 600.0;
    /// Planet radius multiplier for its influence zone / play area
    pub const OUT_OF_BOUNDS_RADIUS_FACTOR: f32 = 2.8 * 1.6;
    /// Spin rate of a rocket that left the play area (rad/s)
    pub const ROCKET_SPIN_SPEED: f32 = std::f32::consts::TAU;
    /// Seconds between asteroid spawns at amount multiplier 1.0
    pub const ASTEROID_SPAWN_RATE: f32 = 1.5;
    /// Lingering pollution decay per second
    pub const POLLUTION_DECAY_RATE: f32 = 0.25;

    /// Rocket body radius
    pub const ROCKET_RADIUS: f32 = 15.0;
    /// Collision radius as a share of the body radius
    pub const ROCKET_COLLISION_SCALE: f32 = 0.8;

    /// Intro total length (seconds)
    pub const INTRO_DURATION: f32 = 4.5;
    /// Intro time at which the rocket starts moving along its path
    pub const SHIP_ANIM_START: f32 = 1.0;

    /// Seconds of play between trajectory markers
    pub const TRAJECTORY_SPAWN_INTERVAL: f32 = 1.0 / 5.0;
    pub const TRAJECTORY_POINT_LIFETIME: f32 = 1.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Uniform sample in `[min, max)`; `min == max` returns `min`
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Facing angle for a velocity (nose points along travel)
#[inline]
pub fn heading_angle(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x) + std::f32::consts::FRAC_PI_2
}

/// Parse `#RRGGBB` (leading `#` optional) into `0xRRGGBB`
pub fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
