//! Simulation tick
//!
//! Advances a run by one host frame. Time comes in from the caller, is
//! clamped, and is the only clock the simulation sees.

use rand::Rng;

use super::collision::{self, Impact};
use super::entities::{self, Collector, LOOT_PULL_SPEED, TrailPoint};
use super::gravity::gravity_field;
use super::pollution;
use super::rocket;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::lerp;
use crate::level::DEFAULT_ASTEROID_COLOR;

/// Debris pieces thrown out by an asteroid impact
const IMPACT_DEBRIS: usize = 5;
/// Chance that a destroyed asteroid drops loot
const LOOT_DROP_CHANCE: f32 = 0.5;
/// Stabilizer glow ramp (per second)
const STABILIZATION_FADE_SPEED: f32 = 5.0;
/// Fuel shake smoothing (per second)
const FUEL_SHAKE_SMOOTHING: f32 = 10.0;

/// Control state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer is held
    pub thrusting: bool,
    /// Held after a double tap (engages the stabilizer)
    pub double_tap_hold: bool,
    /// Drag-mode throttle in `[-1, 1]`, if a drag is in progress
    pub drag: Option<f32>,
}

/// Advance the run by `dt` seconds and report what happened.
///
/// Non-positive or non-finite `dt` and paused runs are left untouched;
/// otherwise `dt` is clamped to `MAX_FRAME_DT`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !dt.is_finite() || dt <= 0.0 || state.phase == GamePhase::Paused {
        return events;
    }
    let dt = dt.min(MAX_FRAME_DT);

    update_stabilization_effect(state, input, dt);
    if state.settings.enable_trajectory {
        entities::update_trail(&mut state.trail, dt);
    }
    update_populations(state, dt, &mut events);
    update_pollution(state, dt);
    update_fuel_shake(state, input, dt);

    match state.phase {
        GamePhase::GameOver => rocket::update_frozen(&mut state.rocket, dt),
        GamePhase::Intro => {
            if let Some(overflow) = rocket::update_intro(&mut state.rocket, &mut state.intro_timer, dt) {
                state.phase = GamePhase::Playing;
                state.game_time = 0.0;
                log::info!("Intro complete, handing control to the player");
                events.push(GameEvent::IntroComplete);
                update_playing(state, input, overflow, &mut events);
            }
        }
        GamePhase::Playing => update_playing(state, input, dt, &mut events),
        GamePhase::Paused => {}
    }

    events
}

fn update_stabilization_effect(state: &mut GameState, input: &TickInput, dt: f32) {
    let stabilizing = input.thrusting && state.settings.enable_stabilization && input.double_tap_hold;
    let step = dt * STABILIZATION_FADE_SPEED;
    state.stabilization_effect = if stabilizing {
        (state.stabilization_effect + step).min(1.0)
    } else {
        (state.stabilization_effect - step).max(0.0)
    };
}

/// Age every entity population and resolve asteroid impacts.
/// Runs in every unpaused phase.
fn update_populations(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let sr = state.settings.speed_regulator;

    entities::update_particles(&mut state.particles, dt);
    entities::update_debris(&mut state.debris, dt);

    // Loot only homes in on a rocket that is in play
    let collector = (state.phase == GamePhase::Playing).then_some(Collector {
        pos: state.rocket.pos,
        radius: state.rocket.collision_radius,
    });
    for value in entities::update_loot(&mut state.loot, collector, LOOT_PULL_SPEED * sr, dt) {
        state.loot_collected += value;
        log::debug!("Collected loot worth {value}, total {}", state.loot_collected);
        events.push(GameEvent::LootCollected {
            value,
            total: state.loot_collected,
        });
    }

    let drift_from = state.settings.dust_clouds_move.then(|| state.world.center());
    entities::update_dust_clouds(&mut state.dust_clouds, drift_from, sr, dt);

    if state.settings.asteroids_have_gravity {
        entities::apply_asteroid_gravity(&mut state.asteroids, &state.planets, &state.settings, dt);
    }
    entities::advance_asteroids(&mut state.asteroids, dt);

    for impact in collision::asteroid_planet_impacts(&mut state.asteroids, &state.planets) {
        events.push(GameEvent::AsteroidImpact { pos: impact.pos });
        if state.general.sound_on {
            entities::spawn_debris(&mut state.debris, &mut state.rng, impact.pos, IMPACT_DEBRIS, sr);
        }
        spawn_wreckage(state, &impact);
    }

    if state.settings.asteroid_asteroid_collision {
        for hit in collision::asteroid_pair_collisions(&mut state.asteroids) {
            events.push(GameEvent::AsteroidCollision { pos: hit.pos });
            // Every effect of a rock-on-rock hit is cosmetic and follows the sound toggle
            if state.general.sound_on {
                entities::spawn_debris(&mut state.debris, &mut state.rng, hit.pos, IMPACT_DEBRIS, sr);
                spawn_wreckage(state, &hit);
            }
        }
    }
}

/// Dust cloud and loot left behind by a destroyed asteroid
fn spawn_wreckage(state: &mut GameState, impact: &Impact) {
    if state.settings.enable_pollution {
        let cloud = entities::spawn_dust_cloud(&mut state.rng, impact.pos, impact.radius);
        state.dust_clouds.push(cloud);
    }
    if state.settings.enable_loot && state.rng.random::<f32>() < LOOT_DROP_CHANCE {
        entities::spawn_loot(
            &mut state.loot,
            &mut state.rng,
            impact.pos,
            &state.planets,
            &state.settings,
        );
    }
}

fn update_pollution(state: &mut GameState, dt: f32) {
    let exposure = if state.settings.enable_pollution {
        pollution::cloud_exposure(&state.dust_clouds, state.rocket.pos)
    } else {
        0.0
    };
    state.pollution.update(exposure, dt);
}

fn update_fuel_shake(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut target = 0.0;
    if input.thrusting && state.settings.fuel_enabled() {
        let thrust_ratio = (state.thrust.visual_magnitude / THRUST_FORCE).min(1.0);
        if state.rocket.fuel <= 0.0 {
            target = 1.0;
        } else if thrust_ratio > 0.0 {
            target = 0.5 + thrust_ratio * 0.5;
        }
    }
    state.fuel_shake = lerp(state.fuel_shake, target, dt * FUEL_SHAKE_SMOOTHING);
}

/// One step of active play: rocket physics, asteroid cadence, end checks
fn update_playing(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    state.game_time += dt;
    state.thrust = Default::default();

    if state.settings.enable_trajectory
        && state.game_time - state.last_trail_spawn > TRAJECTORY_SPAWN_INTERVAL
    {
        state.trail.push(TrailPoint::new(state.rocket.pos));
        state.last_trail_spawn = state.game_time;
    }

    let settings = &state.settings;
    let field = gravity_field(
        &state.planets,
        state.rocket.pos,
        settings.gravity_mode,
        settings.speed_regulator,
    );
    let dominant = field.dominant.and_then(|i| state.planets.get(i));
    let fuel_before = state.rocket.fuel;
    state.thrust = rocket::update_flying(&mut state.rocket, &field, dominant, input, settings, dt);

    if settings.fuel_enabled() && fuel_before > 0.0 && state.rocket.fuel <= 0.0 {
        log::info!("Fuel depleted at {:.2}s", state.game_time);
        events.push(GameEvent::FuelDepleted);
    }

    let spawn_interval = ASTEROID_SPAWN_RATE / state.settings.asteroid_amount_multiplier;
    if state.game_time - state.last_asteroid_spawn > spawn_interval {
        spawn_asteroid(state, events);
        state.last_asteroid_spawn = state.game_time;
    }

    // Zone membership is judged where the rocket started this step
    if let Some(reason) = collision::rocket_end_condition(
        field.inside_any_zone,
        &state.rocket,
        &state.planets,
        &state.asteroids,
        state.settings.player_asteroid_collision,
    ) {
        state.end_game(reason, events);
    }
}

fn spawn_asteroid(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let id = state.next_entity_id();
    let color = if state.settings.color_asteroids_by_level {
        state.level.asteroid_color()
    } else {
        DEFAULT_ASTEROID_COLOR
    };
    let asteroid = entities::spawn_asteroid(
        &mut state.rng,
        id,
        &state.world,
        &state.planets,
        state.level.spawn_sectors(),
        color,
        &state.settings,
    );
    log::debug!("Spawned asteroid {id} at {:?}", asteroid.pos);
    state.asteroids.push(asteroid);
    events.push(GameEvent::AsteroidSpawned { id });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelConfig;
    use crate::settings::{ControlMode, DevSettings, GeneralSettings};
    use crate::sim::entities::{Asteroid, Loot, LootKind};
    use crate::sim::state::{EndReason, RunSummary, Viewport};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn new_state(settings: DevSettings) -> GameState {
        GameState::new(
            LevelConfig::default(),
            settings,
            GeneralSettings::default(),
            Viewport::new(1000.0, 800.0),
            12345,
        )
        .unwrap()
    }

    fn no_intro() -> DevSettings {
        DevSettings {
            play_intro: false,
            ..Default::default()
        }
    }

    fn rock(id: u32, pos: Vec2, radius: f32) -> Asteroid {
        Asteroid {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            spin: 0.0,
            points: Vec::new(),
            color: 0,
        }
    }

    #[test]
    fn test_intro_hands_over_on_exact_boundary() {
        let mut state = new_state(DevSettings::default());
        assert_eq!(state.phase, GamePhase::Intro);
        let input = TickInput::default();

        for _ in 0..71 {
            let events = tick(&mut state, &input, 0.0625);
            assert!(events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::Intro);

        let events = tick(&mut state, &input, 0.0625);
        assert_eq!(events, vec![GameEvent::IntroComplete]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.rocket.pos, state.rocket.target.pos);
        assert_eq!(state.rocket.vel, state.rocket.target.vel);
    }

    #[test]
    fn test_invalid_dt_is_a_no_op() {
        let mut state = new_state(no_intro());
        let before = state.rocket.pos;
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(tick(&mut state, &TickInput::default(), dt).is_empty());
        }
        assert_eq!(state.rocket.pos, before);
        assert_eq!(state.game_time, 0.0);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = new_state(no_intro());
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.game_time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_paused_tick_changes_nothing() {
        let mut state = new_state(no_intro());
        tick(&mut state, &TickInput::default(), DT);
        state.pause();
        let pos = state.rocket.pos;
        let time = state.game_time;
        let thrust = TickInput {
            thrusting: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(tick(&mut state, &thrust, DT).is_empty());
        }
        assert_eq!(state.rocket.pos, pos);
        assert_eq!(state.game_time, time);
        state.resume();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = new_state(no_intro());
        let mut b = new_state(no_intro());
        let input = TickInput {
            thrusting: true,
            double_tap_hold: false,
            drag: Some(0.3),
        };
        for i in 0..300 {
            let held = if i % 40 < 20 { input } else { TickInput::default() };
            let ea = tick(&mut a, &held, DT);
            let eb = tick(&mut b, &held, DT);
            assert_eq!(ea, eb);
        }
        let sa = serde_json::to_string(&a.snapshot()).unwrap();
        let sb = serde_json::to_string(&b.snapshot()).unwrap();
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_asteroids_spawn_on_cadence() {
        let mut state = new_state(no_intro());
        let mut spawned = Vec::new();
        for _ in 0..40 {
            for event in tick(&mut state, &TickInput::default(), 0.05) {
                if let GameEvent::AsteroidSpawned { id } = event {
                    spawned.push(id);
                }
            }
        }
        // One every 0.75s over 2s of play
        assert_eq!(spawned.len(), 2);
        assert_ne!(spawned[0], spawned[1]);
        assert!(state.asteroids.iter().all(|a| a.color == 0x525F7F));
    }

    #[test]
    fn test_leaving_the_zone_ends_once() {
        let mut state = new_state(no_intro());
        state.rocket.pos = Vec2::new(5000.0, 5000.0);
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::GameOver(RunSummary {
                reason: EndReason::Bounds,
                ..
            })]
        ));
        assert!(state.rocket.spinning);

        let angle = state.rocket.angle;
        for _ in 0..10 {
            let events = tick(&mut state, &TickInput::default(), DT);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver(_))));
        }
        assert!(state.rocket.angle > angle);
        assert_eq!(state.thrust, Default::default());
    }

    #[test]
    fn test_hitting_an_asteroid_destroys_rocket() {
        let mut state = new_state(no_intro());
        let pos = state.rocket.pos;
        let id = state.next_entity_id();
        state.asteroids.push(rock(id, pos, 20.0));
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver(RunSummary {
                reason: EndReason::Collision,
                ..
            })
        )));
        assert!(state.rocket.destroyed);
        assert!(!state.particles.is_empty());

        let wreck = state.rocket.pos;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.rocket.pos, wreck);
    }

    #[test]
    fn test_asteroid_collision_can_be_disabled() {
        let mut state = new_state(DevSettings {
            player_asteroid_collision: false,
            ..no_intro()
        });
        let pos = state.rocket.pos;
        state.asteroids.push(rock(99, pos, 20.0));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_planet_impact_effects() {
        let mut state = new_state(no_intro());
        let surface = state.planets[0].pos + Vec2::new(state.planets[0].radius, 0.0);
        state.asteroids.push(rock(7, surface, 20.0));
        let events = tick(&mut state, &TickInput::default(), DT);

        assert!(events.iter().any(|e| matches!(e, GameEvent::AsteroidImpact { .. })));
        assert!(state.asteroids.is_empty());
        assert_eq!(state.debris.len(), IMPACT_DEBRIS);
        assert_eq!(state.dust_clouds.len(), 1);
        assert_eq!(state.dust_clouds[0].radius, 20.0);
    }

    #[test]
    fn test_impact_debris_follows_sound_toggle() {
        let mut state = new_state(no_intro());
        state.general.sound_on = false;
        let surface = state.planets[0].pos + Vec2::new(state.planets[0].radius, 0.0);
        state.asteroids.push(rock(7, surface, 20.0));
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.debris.is_empty());
        assert_eq!(state.dust_clouds.len(), 1);
    }

    #[test]
    fn test_rock_on_rock_effects_gated_on_sound() {
        let far = Vec2::new(-3000.0, -3000.0);
        let mut state = new_state(DevSettings {
            asteroids_have_gravity: false,
            ..no_intro()
        });
        state.general.sound_on = false;
        state.asteroids.push(rock(1, far, 20.0));
        state.asteroids.push(rock(2, far + Vec2::new(10.0, 0.0), 20.0));
        state.asteroids.push(rock(3, far + Vec2::new(-500.0, 0.0), 20.0));
        let events = tick(&mut state, &TickInput::default(), DT);

        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::AsteroidCollision { .. }))
                .count(),
            1
        );
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].id, 3);
        assert!(state.debris.is_empty());
        assert!(state.dust_clouds.is_empty());
    }

    #[test]
    fn test_loot_collected_in_play() {
        let mut state = new_state(no_intro());
        let pos = state.rocket.pos;
        state.loot.push(Loot::new(LootKind::Medium, pos, Vec2::ZERO));
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::LootCollected { value: 3, total: 3 }));
        assert_eq!(state.loot_collected, 3);
        assert!(state.loot.is_empty());
    }

    #[test]
    fn test_loot_ignored_during_intro() {
        let mut state = new_state(DevSettings::default());
        let pos = state.rocket.pos;
        state.loot.push(Loot::new(LootKind::Small, pos, Vec2::ZERO));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.loot.len(), 1);
        assert_eq!(state.loot_collected, 0);
    }

    #[test]
    fn test_fuel_depleted_reported_once() {
        let mut state = new_state(DevSettings {
            control_mode: ControlMode::Retrograde,
            fuel_seconds: 0.05,
            ..no_intro()
        });
        let input = TickInput {
            thrusting: true,
            ..Default::default()
        };
        let mut depleted = 0;
        for _ in 0..5 {
            depleted += tick(&mut state, &input, 0.05)
                .iter()
                .filter(|e| **e == GameEvent::FuelDepleted)
                .count();
        }
        assert_eq!(depleted, 1);
        assert_eq!(state.rocket.fuel, 0.0);
        assert_eq!(state.thrust.applied, Vec2::ZERO);
        assert!(state.fuel_shake > 0.5);
    }

    #[test]
    fn test_stabilization_effect_ramps() {
        let mut state = new_state(no_intro());
        let hold = TickInput {
            thrusting: true,
            double_tap_hold: true,
            drag: None,
        };
        tick(&mut state, &hold, 0.1);
        assert!((state.stabilization_effect - 0.5).abs() < 1e-6);
        tick(&mut state, &hold, 0.1);
        assert_eq!(state.stabilization_effect, 1.0);
        tick(&mut state, &TickInput::default(), 0.1);
        assert!((state.stabilization_effect - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_dust_cloud_raises_pollution() {
        let mut state = new_state(DevSettings {
            dust_clouds_move: false,
            ..no_intro()
        });
        let cloud = entities::spawn_dust_cloud(&mut state.rng, state.rocket.pos, 80.0);
        state.dust_clouds.push(cloud);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.pollution.actual > 0.9);
        assert!(state.pollution.displayed > 0.0);
    }

    #[test]
    fn test_trail_dropped_while_playing() {
        let mut state = new_state(no_intro());
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert!(!state.trail.is_empty());
        assert!(state.trail.iter().all(|t| t.life > 0.0));
    }
}
