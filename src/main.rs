//! Orbital Guardian headless runner
//!
//! Plays one seeded run with a scripted pilot and logs the outcome.
//!
//! Usage: `orbital-guardian [LEVEL_ID | LEVEL_JSON_PATH] [SEED]`

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use orbital_guardian::level::{self, LevelConfig};
use orbital_guardian::sim::{GameEvent, GamePhase, GameState, RunSummary, Viewport};
use orbital_guardian::{DevSettings, GeneralSettings, Renderer, Session, Stats};

const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much wall-clock time if the pilot never crashes
const MAX_RUN_MS: f64 = 120_000.0;

/// Logs a HUD line once per second of play
#[derive(Default)]
struct HudLogger {
    next_report: f32,
}

impl Renderer for HudLogger {
    fn render(&mut self, state: &GameState) {
        if state.phase != GamePhase::Playing || state.game_time < self.next_report {
            return;
        }
        self.next_report = state.game_time.floor() + 1.0;
        let hud = state.snapshot();
        log::debug!(
            "t={:.1}s fuel={:.0}% pollution={:.2} asteroids={} loot={}",
            hud.game_time,
            hud.fuel_ratio * 100.0,
            hud.pollution,
            hud.asteroid_count,
            hud.loot_collected
        );
    }
}

fn load_level(arg: Option<&str>) -> Result<LevelConfig, Box<dyn std::error::Error>> {
    let Some(arg) = arg else {
        return Ok(LevelConfig::default());
    };
    if let Ok(id) = arg.parse::<u32>() {
        return Ok(level::builtin_level(id).unwrap_or_else(|| {
            log::warn!("No built-in level {id}, using level 1");
            LevelConfig::default()
        }));
    }
    let json = std::fs::read_to_string(arg)?;
    Ok(LevelConfig::from_json(&json)?)
}

/// Scripted pilot: every few seconds, double tap and hold the stabilizer
/// for a second, otherwise coast.
fn fly(session: &mut Session, now_ms: f64) {
    let center = Vec2::new(VIEWPORT.width / 2.0, VIEWPORT.height / 2.0);
    let phase_ms = now_ms % 4000.0;
    if (3000.0..3000.0 + FRAME_MS).contains(&phase_ms) {
        session.pointer_down(center, now_ms);
        session.pointer_up();
        session.pointer_down(center, now_ms + 100.0);
    } else if (3900.0..3900.0 + FRAME_MS).contains(&phase_ms) {
        session.pointer_up();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let level = load_level(args.first().map(String::as_str))?;
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    log::info!("Orbital Guardian (native) starting: level {} \"{}\", seed {seed}", level.id, level.title);

    let mut stats = Stats::new();
    stats.record_attempt();

    let result: Rc<RefCell<Option<RunSummary>>> = Rc::default();
    let sink = Rc::clone(&result);
    let mut session = Session::start(
        level,
        DevSettings::default(),
        GeneralSettings::default(),
        VIEWPORT,
        seed,
    )?
    .on_end(move |summary| *sink.borrow_mut() = Some(*summary));

    let mut hud = HudLogger::default();
    let mut now_ms = 0.0;
    while now_ms < MAX_RUN_MS && result.borrow().is_none() {
        fly(&mut session, now_ms);
        for event in session.frame(now_ms) {
            match event {
                GameEvent::IntroComplete => log::info!("Intro complete"),
                GameEvent::FuelDepleted => log::warn!("Out of fuel"),
                GameEvent::LootCollected { value, total } => {
                    log::info!("Loot +{value} (total {total})")
                }
                _ => {}
            }
        }
        session.render(&mut hud);
        now_ms += FRAME_MS;
    }

    let summary = *result.borrow();
    match summary {
        Some(summary) => {
            log::info!(
                "Run over ({}): {:.2}s survived, {} loot",
                summary.reason.as_str(),
                summary.survival_time,
                summary.loot_collected
            );
            stats.record_run(&summary);
        }
        None => log::info!("Pilot survived the whole session"),
    }
    session.destroy();

    println!("{}", stats.to_json()?);
    Ok(())
}
