//! Rocket flight
//!
//! The rocket is created on a circular orbit around the first planet,
//! optionally flies in along a Bézier curve during the intro, and is then
//! driven by gravity plus whatever thrust the control scheme asks for.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gravity::{self, GravityField};
use super::state::{Planet, World};
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::{ControlMode, DevSettings};
use crate::{heading_angle, rand_range};

/// Radial damping gain of the stabilizer
const RADIAL_CORRECTION_GAIN: f32 = 80.0;
/// Tangential speed-matching gain of the stabilizer
const TANGENTIAL_CORRECTION_GAIN: f32 = 60.0;
/// Intro entry points sit this far outside the left/right world edges
const INTRO_ENTRY_MARGIN: f32 = 100.0;
/// Intro control point distance as a share of the entry-to-target distance
const INTRO_CONTROL_FACTOR: f32 = 0.8;

/// Orbital insertion state the rocket is delivered to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitTarget {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Quadratic Bézier the rocket follows during the intro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntroPath {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl IntroPath {
    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u) + self.p1 * (2.0 * u * t) + self.p2 * (t * t)
    }

    /// Direction of travel as the path arrives at `p2`
    pub fn end_tangent(&self) -> Vec2 {
        self.p2 - self.p1
    }
}

/// Thrust actually applied in a step, for effects and HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThrustOutput {
    pub applied: Vec2,
    /// Flame size; in drag mode this is the throttle before speed scaling
    pub visual_magnitude: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (rad); 0 points up the screen
    pub angle: f32,
    pub radius: f32,
    pub collision_radius: f32,
    pub fuel: f32,
    pub max_fuel: f32,
    pub destroyed: bool,
    pub spinning: bool,
    pub target: OrbitTarget,
    pub intro_path: Option<IntroPath>,
}

impl Rocket {
    /// Create the rocket for a new attempt around `primary`.
    ///
    /// With the intro enabled the rocket waits at the start of its intro
    /// path; otherwise it is placed directly on the orbit.
    pub fn spawn<R: Rng + ?Sized>(primary: &Planet, world: &World, settings: &DevSettings, rng: &mut R) -> Self {
        let spawn_distance = primary.radius + (primary.influence_radius() - primary.radius) * 0.5;
        let stable_speed = gravity::stable_orbit_speed(
            spawn_distance,
            primary.gravity_factor,
            settings.gravity_mode,
            settings.speed_regulator,
        );
        let orbital_speed = stable_speed * settings.decaying_orbit_factor;
        let spawn_angle = rand_range(rng, 0.0, std::f32::consts::TAU);
        let (sin, cos) = spawn_angle.sin_cos();

        let target = OrbitTarget {
            pos: primary.pos + Vec2::new(cos, sin) * spawn_distance,
            vel: Vec2::new(-sin, cos) * orbital_speed,
        };

        let (max_fuel, fuel) = if settings.fuel_enabled() {
            (settings.fuel_seconds, settings.fuel_seconds)
        } else {
            (1.0, 1.0)
        };

        let mut rocket = Self {
            pos: target.pos,
            vel: target.vel,
            angle: heading_angle(target.vel),
            radius: ROCKET_RADIUS,
            collision_radius: ROCKET_RADIUS * ROCKET_COLLISION_SCALE,
            fuel,
            max_fuel,
            destroyed: false,
            spinning: false,
            target,
            intro_path: None,
        };

        if settings.play_intro {
            let path = choose_intro_path(world, &target);
            rocket.pos = path.p0;
            rocket.vel = Vec2::ZERO;
            rocket.angle = 0.0;
            rocket.intro_path = Some(path);
        }
        rocket
    }

    /// Put the rocket exactly on its orbit target
    pub fn snap_to_target(&mut self) {
        self.pos = self.target.pos;
        self.vel = self.target.vel;
        self.angle = heading_angle(self.vel);
    }
}

/// Pick the side of the screen whose approach curve arrives most nearly
/// along the orbit direction. Ties go to the right side.
fn choose_intro_path(world: &World, target: &OrbitTarget) -> IntroPath {
    let p2 = target.pos;
    let back = -target.vel.normalize_or_zero();
    let candidate = |p0: Vec2| IntroPath {
        p0,
        p1: p2 + back * p0.distance(p2) * INTRO_CONTROL_FACTOR,
        p2,
    };
    let alignment = |path: &IntroPath| {
        let tangent = path.end_tangent();
        let denom = nonzero_or_one(tangent.length()) * nonzero_or_one(target.vel.length());
        tangent.dot(target.vel) / denom
    };

    let left = candidate(Vec2::new(-INTRO_ENTRY_MARGIN, world.height / 2.0));
    let right = candidate(Vec2::new(world.width + INTRO_ENTRY_MARGIN, world.height / 2.0));
    if alignment(&left) > alignment(&right) {
        left
    } else {
        right
    }
}

#[inline]
fn nonzero_or_one(v: f32) -> f32 {
    if v == 0.0 { 1.0 } else { v }
}

/// Cubic ease-in-out
#[inline]
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Advance the intro. Returns the time left over past the end of the intro
/// once it finishes, at which point the rocket sits exactly on its target.
pub fn update_intro(rocket: &mut Rocket, intro_timer: &mut f32, dt: f32) -> Option<f32> {
    *intro_timer += dt;
    let anim_duration = INTRO_DURATION - SHIP_ANIM_START;
    let t_ship = ((*intro_timer - SHIP_ANIM_START).max(0.0) / anim_duration).min(1.0);

    if t_ship > 0.0
        && let Some(path) = rocket.intro_path
    {
        let prev = rocket.pos;
        rocket.pos = path.point(ease_in_out_cubic(t_ship));
        if t_ship > 0.01 && dt > 0.0 {
            rocket.vel = (rocket.pos - prev) / dt;
            rocket.angle = heading_angle(rocket.vel);
        }
    }

    if *intro_timer >= INTRO_DURATION {
        rocket.snap_to_target();
        return Some(*intro_timer - INTRO_DURATION);
    }
    None
}

/// Thrust available this step before any direction is chosen
fn thrust_budget(settings: &DevSettings, stabilizing: bool) -> f32 {
    let mut budget = THRUST_FORCE * settings.speed_factor();
    if stabilizing && settings.control_mode == ControlMode::Drag {
        budget *= settings.mode2_thrust_multiplier;
    }
    budget
}

/// Correction that damps radial motion and matches the stable orbital
/// speed around `planet`. `None` when the rocket sits on the planet centre.
fn stabilizer_correction(rocket: &Rocket, planet: &Planet, settings: &DevSettings) -> Option<(Vec2, Vec2, f32)> {
    let delta = planet.pos - rocket.pos;
    let dist = delta.length();
    if dist <= 0.0 {
        return None;
    }
    let sr = settings.speed_regulator;
    let radial = delta / dist;
    let tangent = Vec2::new(-delta.y, delta.x) / dist;

    let mut correction = Vec2::ZERO;
    let radial_speed = rocket.vel.dot(radial);
    if radial_speed.abs() > settings.stabilization_radial_threshold * sr {
        correction += radial * (-radial_speed * RADIAL_CORRECTION_GAIN);
    }

    let stable_speed = gravity::stable_orbit_speed(dist, planet.gravity_factor, settings.gravity_mode, sr);
    let tangential_speed = rocket.vel.dot(tangent);
    let orbit_direction = if tangential_speed < 0.0 { -1.0 } else { 1.0 };
    let target_speed = stable_speed * orbit_direction;
    let speed_diff = target_speed - tangential_speed;
    if speed_diff.abs() > settings.stabilization_speed_threshold * sr {
        correction += tangent * (speed_diff * TANGENTIAL_CORRECTION_GAIN);
    }

    Some((correction, tangent, target_speed))
}

/// Thrust for the drag scheme from a throttle in `[-1, 1]`.
/// Returns the applied thrust and the unscaled magnitude for the flame.
fn drag_thrust(rocket: &Rocket, throttle: f32, settings: &DevSettings) -> (Vec2, f32) {
    let throttle = throttle.clamp(-1.0, 1.0);
    let unscaled = throttle.abs() * THRUST_FORCE * settings.mode2_thrust_multiplier;
    let magnitude = unscaled * settings.speed_factor();

    let speed = rocket.vel.length();
    let applied = if speed > 0.0 {
        rocket.vel / speed * magnitude * throttle.signum()
    } else if throttle > 0.0 {
        let forward = rocket.angle - std::f32::consts::FRAC_PI_2;
        Vec2::new(forward.cos(), forward.sin()) * magnitude
    } else {
        Vec2::ZERO
    };
    (applied, unscaled)
}

/// One playing step of rocket physics.
///
/// Chooses thrust (stabilizer, retrograde or drag), burns fuel for it, then
/// integrates with semi-implicit Euler: velocity first, then position from
/// the new velocity.
pub fn update_flying(
    rocket: &mut Rocket,
    field: &GravityField,
    dominant: Option<&Planet>,
    input: &TickInput,
    settings: &DevSettings,
    dt: f32,
) -> ThrustOutput {
    let mut output = ThrustOutput::default();
    let has_fuel = !settings.fuel_enabled() || rocket.fuel > 0.0;

    if input.thrusting && has_fuel {
        let stabilizing = settings.enable_stabilization && input.double_tap_hold;
        let budget = thrust_budget(settings, stabilizing);

        match (stabilizing, dominant) {
            (true, Some(planet)) => {
                if let Some((correction, tangent, target_speed)) =
                    stabilizer_correction(rocket, planet, settings)
                {
                    let required = correction.length();
                    if required <= budget {
                        rocket.vel = tangent * target_speed;
                    } else {
                        output.applied = correction / required * budget;
                    }
                }
            }
            _ => match settings.control_mode {
                ControlMode::Retrograde => {
                    output.applied = -field.force.normalize_or_zero() * budget;
                }
                ControlMode::Drag => {
                    if let Some(throttle) = input.drag {
                        let (applied, unscaled) = drag_thrust(rocket, throttle, settings);
                        output.applied = applied;
                        output.visual_magnitude = unscaled;
                    }
                }
            },
        }

        if output.visual_magnitude == 0.0 {
            output.visual_magnitude = output.applied.length();
        }

        if settings.fuel_enabled() {
            burn_fuel(rocket, output.applied.length(), settings, dt);
        }
    }

    rocket.vel += (field.force + output.applied) * dt;
    if !rocket.destroyed {
        rocket.pos += rocket.vel * dt;
        rocket.angle = heading_angle(rocket.vel);
    }
    output
}

/// Drain fuel in proportion to the thrust actually applied
fn burn_fuel(rocket: &mut Rocket, applied: f32, settings: &DevSettings, dt: f32) {
    let full_thrust = THRUST_FORCE * settings.speed_factor();
    if full_thrust <= 0.0 {
        return;
    }
    let mut ratio = applied / full_thrust;
    if settings.control_mode == ControlMode::Drag && settings.mode2_thrust_multiplier > 0.0 {
        ratio /= settings.mode2_thrust_multiplier;
    }
    rocket.fuel = (rocket.fuel - dt * ratio).max(0.0);
}

/// Game-over motion: a rocket that left the play area spins and drifts;
/// a destroyed one stays put.
pub fn update_frozen(rocket: &mut Rocket, dt: f32) {
    if rocket.spinning && !rocket.destroyed {
        rocket.angle += ROCKET_SPIN_SPEED * dt;
        rocket.pos += rocket.vel * dt;
    }
}
