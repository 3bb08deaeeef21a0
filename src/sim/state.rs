//! Game state and core simulation types
//!
//! `GameState` owns everything a run mutates. Subsystems borrow only the
//! parts they need; see `tick` for the order they run in.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{self, Asteroid, Debris, DustCloud, Loot, Particle, TrailPoint};
use super::pollution::Pollution;
use super::rocket::{Rocket, ThrustOutput};
use crate::consts::*;
use crate::error::ConfigError;
use crate::level::{LevelConfig, parse_color};
use crate::settings::{DevSettings, GeneralSettings};

/// Explosion tint when the rocket hits something
pub const CRASH_COLOR: u32 = 0xFF4141;
/// Particles in the crash explosion
pub const CRASH_PARTICLES: usize = 100;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scripted entrance along the intro path
    Intro,
    /// Active gameplay
    Playing,
    /// Frozen; resumes into the phase it paused from
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Hit a planet or an asteroid
    Collision,
    /// Left every gravity well
    Bounds,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Collision => "collision",
            EndReason::Bounds => "bounds",
        }
    }
}

/// Result of a finished run, handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seconds survived in the playing phase
    pub survival_time: f32,
    pub loot_collected: u32,
    pub reason: EndReason,
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Intro finished; control handed to the player
    IntroComplete,
    AsteroidSpawned { id: u32 },
    /// An asteroid struck a planet
    AsteroidImpact { pos: Vec2 },
    /// Two asteroids destroyed each other
    AsteroidCollision { pos: Vec2 },
    LootCollected { value: u32, total: u32 },
    FuelDepleted,
    GameOver(RunSummary),
}

/// Host viewport in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Logical world: fixed width, height from the viewport aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Viewport pixels per world unit
    pub scale: f32,
    pub viewport: Viewport,
}

impl World {
    pub fn from_viewport(viewport: Viewport) -> Result<Self, ConfigError> {
        let usable = viewport.width.is_finite()
            && viewport.height.is_finite()
            && viewport.width > 0.0
            && viewport.height > 0.0;
        if !usable {
            return Err(ConfigError::DegenerateViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let scale = viewport.width / WORLD_WIDTH;
        Ok(Self {
            width: WORLD_WIDTH,
            height: viewport.height / scale,
            scale,
            viewport,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A planet placed in world units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub pos: Vec2,
    pub radius: f32,
    pub gravity_factor: f32,
    pub color: u32,
}

impl Planet {
    /// Radius of the gravity well / play zone around this planet
    #[inline]
    pub fn influence_radius(&self) -> f32 {
        self.radius * OUT_OF_BOUNDS_RADIUS_FACTOR
    }
}

/// Lay out a level's planets in a world
pub fn place_planets(level: &LevelConfig, world: &World) -> Result<Vec<Planet>, ConfigError> {
    level
        .planets
        .iter()
        .map(|p| {
            Ok(Planet {
                pos: Vec2::new(
                    world.width * p.x,
                    world.height / 2.0 + (p.y - 0.5) * world.width,
                ),
                radius: world.width * p.radius_factor,
                gravity_factor: p.gravity_factor,
                color: parse_color(&p.color)?,
            })
        })
        .collect()
}

/// Read-only view of a run for HUDs and renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub game_time: f32,
    pub intro_timer: f32,
    pub rocket_pos: Vec2,
    pub rocket_vel: Vec2,
    pub rocket_angle: f32,
    pub rocket_destroyed: bool,
    pub rocket_spinning: bool,
    /// 0..=1; always 1 when fuel is disabled
    pub fuel_ratio: f32,
    pub pollution: f32,
    pub thrust: Vec2,
    pub thrust_magnitude: f32,
    pub stabilization_effect: f32,
    pub fuel_shake: f32,
    pub loot_collected: u32,
    pub asteroid_count: usize,
    pub loot_count: usize,
    pub dust_cloud_count: usize,
}

/// Complete state of one level attempt
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: DevSettings,
    pub general: GeneralSettings,
    pub level: LevelConfig,
    pub world: World,
    /// Fixed once the level is set up
    pub planets: Vec<Planet>,
    pub rocket: Rocket,
    pub phase: GamePhase,
    /// Phase to return to on resume
    pub paused_from: Option<GamePhase>,
    /// Seconds spent in the playing phase
    pub game_time: f32,
    pub intro_timer: f32,
    pub last_asteroid_spawn: f32,
    pub last_trail_spawn: f32,
    pub loot_collected: u32,
    pub end_reason: Option<EndReason>,
    pub crash_site: Option<Vec2>,
    /// Thrust applied during the last playing step
    pub thrust: ThrustOutput,
    pub pollution: Pollution,
    /// 0..=1 glow while the stabilizer is engaged
    pub stabilization_effect: f32,
    /// 0..=1 shake while burning (stronger on an empty tank)
    pub fuel_shake: f32,
    pub asteroids: Vec<Asteroid>,
    pub debris: Vec<Debris>,
    pub particles: Vec<Particle>,
    pub loot: Vec<Loot>,
    pub dust_clouds: Vec<DustCloud>,
    pub trail: Vec<TrailPoint>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Set up a level attempt. Fails only on bad configuration.
    pub fn new(
        level: LevelConfig,
        settings: DevSettings,
        general: GeneralSettings,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        level.validate()?;
        settings.validate()?;
        let world = World::from_viewport(viewport)?;
        let planets = place_planets(&level, &world)?;
        let primary = planets.first().ok_or(ConfigError::NoPlanets)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let rocket = Rocket::spawn(primary, &world, &settings, &mut rng);
        let phase = if rocket.intro_path.is_some() {
            GamePhase::Intro
        } else {
            GamePhase::Playing
        };
        let pollution = Pollution::new(level.global_pollution);

        log::info!(
            "Level {} set up: {} planet(s), seed {}, starting in {:?}",
            level.id,
            planets.len(),
            seed,
            phase
        );

        Ok(Self {
            seed,
            rng,
            settings,
            general,
            level,
            world,
            planets,
            rocket,
            phase,
            paused_from: None,
            game_time: 0.0,
            intro_timer: 0.0,
            last_asteroid_spawn: 0.0,
            last_trail_spawn: 0.0,
            loot_collected: 0,
            end_reason: None,
            crash_site: None,
            thrust: ThrustOutput::default(),
            pollution,
            stabilization_effect: 0.0,
            fuel_shake: 0.0,
            asteroids: Vec::new(),
            debris: Vec::new(),
            particles: Vec::new(),
            loot: Vec::new(),
            dust_clouds: Vec::new(),
            trail: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Freeze the run. Only intro and playing can be paused.
    pub fn pause(&mut self) {
        if matches!(self.phase, GamePhase::Playing | GamePhase::Intro) {
            self.paused_from = Some(self.phase);
            self.phase = GamePhase::Paused;
            log::info!("Paused during {:?}", self.paused_from);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = self.paused_from.take().unwrap_or(GamePhase::Playing);
            log::info!("Resumed into {:?}", self.phase);
        }
    }

    /// Recompute world height for a new viewport. Planets stay where they are.
    pub fn handle_resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.world = World::from_viewport(viewport)?;
        Ok(())
    }

    /// End the run. Later calls are ignored so the first reason sticks.
    pub fn end_game(&mut self, reason: EndReason, events: &mut Vec<GameEvent>) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.paused_from = None;
        self.end_reason = Some(reason);
        self.crash_site = Some(self.rocket.pos);
        self.thrust = ThrustOutput::default();

        match reason {
            EndReason::Collision => {
                self.rocket.destroyed = true;
                if self.general.sound_on {
                    entities::spawn_explosion(
                        &mut self.particles,
                        &mut self.rng,
                        self.rocket.pos,
                        CRASH_PARTICLES,
                        CRASH_COLOR,
                        1.0,
                        self.settings.speed_regulator,
                    );
                }
            }
            EndReason::Bounds => self.rocket.spinning = true,
        }

        let summary = RunSummary {
            survival_time: self.game_time,
            loot_collected: self.loot_collected,
            reason,
        };
        log::info!(
            "Game over ({}): survived {:.2}s, loot {}",
            reason.as_str(),
            summary.survival_time,
            summary.loot_collected
        );
        events.push(GameEvent::GameOver(summary));
    }

    /// Drop every live entity (host is tearing the run down)
    pub fn clear_entities(&mut self) {
        self.asteroids.clear();
        self.debris.clear();
        self.particles.clear();
        self.loot.clear();
        self.dust_clouds.clear();
        self.trail.clear();
    }

    pub fn fuel_ratio(&self) -> f32 {
        if !self.settings.fuel_enabled() || self.rocket.max_fuel <= 0.0 {
            return 1.0;
        }
        (self.rocket.fuel / self.rocket.max_fuel).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            game_time: self.game_time,
            intro_timer: self.intro_timer,
            rocket_pos: self.rocket.pos,
            rocket_vel: self.rocket.vel,
            rocket_angle: self.rocket.angle,
            rocket_destroyed: self.rocket.destroyed,
            rocket_spinning: self.rocket.spinning,
            fuel_ratio: self.fuel_ratio(),
            pollution: self.pollution.displayed,
            thrust: self.thrust.applied,
            thrust_magnitude: self.thrust.visual_magnitude,
            stabilization_effect: self.stabilization_effect,
            fuel_shake: self.fuel_shake,
            loot_collected: self.loot_collected,
            asteroid_count: self.asteroids.len(),
            loot_count: self.loot.len(),
            dust_cloud_count: self.dust_clouds.len(),
        }
    }
}
