//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of every entity list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod gravity;
pub mod input;
pub mod pollution;
pub mod rocket;
pub mod state;
pub mod tick;

pub use collision::{Impact, asteroid_pair_collisions, asteroid_planet_impacts, rocket_end_condition};
pub use entities::{Asteroid, Debris, DustCloud, Loot, LootKind, Particle, TrailPoint};
pub use gravity::{GravityField, gravity_field, gravity_force};
pub use input::GestureTracker;
pub use pollution::Pollution;
pub use rocket::{IntroPath, OrbitTarget, Rocket, ThrustOutput};
pub use state::{
    EndReason, GameEvent, GamePhase, GameState, Planet, RunSummary, Snapshot, Viewport, World,
    CRASH_COLOR, CRASH_PARTICLES,
};
pub use tick::{TickInput, tick};
