//! Game settings and preferences
//!
//! Device settings tune the physics and feature toggles of a run; general
//! settings hold player preferences. Both are persisted by the host as JSON
//! and merged over the defaults when loaded, so older saves missing newer
//! keys still load.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_setting};

/// How planet gravity falls off with distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GravityMode {
    /// Softened inverse-square
    Realistic,
    /// Inverse distance
    #[default]
    Linear,
    /// Same pull everywhere inside the influence zone
    Constant,
}

impl GravityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GravityMode::Realistic => "realistic",
            GravityMode::Linear => "linear",
            GravityMode::Constant => "constant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "realistic" => Some(GravityMode::Realistic),
            "linear" => Some(GravityMode::Linear),
            "constant" => Some(GravityMode::Constant),
            _ => None,
        }
    }
}

/// How a press turns into thrust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Hold to push directly against net gravity
    #[serde(rename = "mode1", alias = "retrograde")]
    Retrograde,
    /// Drag vertically to throttle along (or against) the velocity
    #[default]
    #[serde(rename = "mode2", alias = "drag")]
    Drag,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Retrograde => "mode1",
            ControlMode::Drag => "mode2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mode1" | "retrograde" => Some(ControlMode::Retrograde),
            "mode2" | "drag" => Some(ControlMode::Drag),
            _ => None,
        }
    }
}

/// Physics tuning and feature toggles for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevSettings {
    pub control_mode: ControlMode,
    pub gravity_mode: GravityMode,

    // === Collisions ===
    pub player_asteroid_collision: bool,
    pub asteroid_asteroid_collision: bool,
    pub asteroids_have_gravity: bool,

    // === Fuel ===
    /// Seconds of full thrust; 0 disables fuel entirely
    pub fuel_seconds: f32,

    // === Features ===
    pub enable_pollution: bool,
    pub dust_clouds_move: bool,
    pub play_intro: bool,
    pub enable_loot: bool,
    pub loot_only_in_zone: bool,
    pub color_asteroids_by_level: bool,
    /// Renderer hint: planets grow out of the screen centre during the intro
    pub intro_planets_from_center: bool,
    pub enable_stabilization: bool,
    pub enable_trajectory: bool,

    // === Multipliers ===
    pub asteroid_speed_multiplier: f32,
    /// Starting orbital speed as a share of the stable speed
    pub decaying_orbit_factor: f32,
    pub mode2_thrust_multiplier: f32,
    pub asteroid_amount_multiplier: f32,
    /// Global time scale; forces scale with its square
    pub speed_regulator: f32,

    // === Stabilization ===
    /// Tangential speed error tolerated before correcting
    pub stabilization_speed_threshold: f32,
    /// Radial speed tolerated before damping
    pub stabilization_radial_threshold: f32,
}

impl Default for DevSettings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Drag,
            gravity_mode: GravityMode::Linear,

            player_asteroid_collision: true,
            asteroid_asteroid_collision: true,
            asteroids_have_gravity: true,

            fuel_seconds: 10.0,

            enable_pollution: true,
            dust_clouds_move: true,
            play_intro: true,
            enable_loot: true,
            loot_only_in_zone: true,
            color_asteroids_by_level: true,
            intro_planets_from_center: true,
            enable_stabilization: true,
            enable_trajectory: true,

            asteroid_speed_multiplier: 0.3,
            decaying_orbit_factor: 1.0,
            mode2_thrust_multiplier: 0.3,
            asteroid_amount_multiplier: 2.0,
            speed_regulator: 0.8,

            stabilization_speed_threshold: 5.0,
            stabilization_radial_threshold: 2.0,
        }
    }
}

impl DevSettings {
    /// Whether fuel is tracked at all
    #[inline]
    pub fn fuel_enabled(&self) -> bool {
        self.fuel_seconds > 0.0
    }

    /// speed_regulator², the factor every force is scaled by
    #[inline]
    pub fn speed_factor(&self) -> f32 {
        self.speed_regulator * self.speed_regulator
    }

    /// Check numeric ranges before a run is built from these settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_setting("fuel_seconds", self.fuel_seconds, true)?;
        check_setting("asteroid_speed_multiplier", self.asteroid_speed_multiplier, true)?;
        check_setting("decaying_orbit_factor", self.decaying_orbit_factor, true)?;
        check_setting("mode2_thrust_multiplier", self.mode2_thrust_multiplier, false)?;
        check_setting("asteroid_amount_multiplier", self.asteroid_amount_multiplier, false)?;
        check_setting("speed_regulator", self.speed_regulator, false)?;
        check_setting(
            "stabilization_speed_threshold",
            self.stabilization_speed_threshold,
            true,
        )?;
        check_setting(
            "stabilization_radial_threshold",
            self.stabilization_radial_threshold,
            true,
        )?;
        Ok(())
    }

    /// Parse saved settings, filling missing keys from the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Player preferences that outlive a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub music_on: bool,
    /// Also gates cosmetic crash effects (debris, explosions)
    pub sound_on: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            music_on: true,
            sound_on: true,
        }
    }
}

impl GeneralSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
