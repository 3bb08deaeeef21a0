//! Host-facing session
//!
//! Wraps a [`GameState`] with the lifecycle a host drives: start, frame
//! callbacks with wall-clock timestamps, pointer events, pause/resume,
//! resize, render and teardown.

use glam::Vec2;

use crate::error::ConfigError;
use crate::level::LevelConfig;
use crate::settings::{DevSettings, GeneralSettings};
use crate::sim::{GameEvent, GamePhase, GameState, GestureTracker, RunSummary, Snapshot, Viewport, tick};

/// Drawing backend seam. The simulation never draws anything itself.
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

type EndCallback = Box<dyn FnMut(&RunSummary)>;

pub struct Session {
    state: GameState,
    gestures: GestureTracker,
    /// Host timestamp (ms) of the previous frame
    last_timestamp: Option<f64>,
    on_end: Option<EndCallback>,
    destroyed: bool,
}

impl Session {
    /// Build a run for `level`. Configuration problems are reported here
    /// and nowhere else.
    pub fn start(
        level: LevelConfig,
        settings: DevSettings,
        general: GeneralSettings,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(level, settings, general, viewport, seed)?;
        Ok(Self {
            state,
            gestures: GestureTracker::new(),
            last_timestamp: None,
            on_end: None,
            destroyed: false,
        })
    }

    /// Called once with the run summary when the run ends
    pub fn on_end(mut self, callback: impl FnMut(&RunSummary) + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }

    /// Tear the run down. A destroyed session ignores every later call.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.state.clear_entities();
        self.gestures.pointer_up();
        self.last_timestamp = None;
        log::info!("Session destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn pause(&mut self) {
        if !self.destroyed {
            self.state.pause();
        }
    }

    /// Resume without charging the paused wall-clock time to the simulation
    pub fn resume(&mut self) {
        if !self.destroyed && self.state.phase == GamePhase::Paused {
            self.state.resume();
            self.last_timestamp = None;
        }
    }

    pub fn handle_resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.state.handle_resize(viewport)
    }

    /// Host animation-frame callback. The first frame after start or resume
    /// only records the timestamp.
    pub fn frame(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        if self.destroyed {
            return Vec::new();
        }
        let dt = self
            .last_timestamp
            .map_or(0.0, |prev| ((timestamp_ms - prev) / 1000.0) as f32);
        self.last_timestamp = Some(timestamp_ms);
        self.advance(dt)
    }

    /// Step the simulation by an explicit delta (seconds)
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.destroyed {
            return Vec::new();
        }
        let input = self.gestures.tick_input(self.state.world.viewport.width);
        let events = tick(&mut self.state, &input, dt);

        for event in &events {
            if let GameEvent::GameOver(summary) = event
                && let Some(callback) = self.on_end.as_mut()
            {
                callback(summary);
            }
        }
        events
    }

    pub fn render(&self, renderer: &mut impl Renderer) {
        if !self.destroyed {
            renderer.render(&self.state);
        }
    }

    /// Press at `pos` (CSS px). Ignored outside the intro and active play.
    pub fn pointer_down(&mut self, pos: Vec2, now_ms: f64) {
        if self.destroyed || !matches!(self.state.phase, GamePhase::Intro | GamePhase::Playing) {
            return;
        }
        self.gestures
            .pointer_down(pos, now_ms, self.state.settings.control_mode);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.gestures
            .pointer_move(pos, self.state.settings.control_mode);
    }

    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
