//! Game controller
//!
//! Owns the simulation state, feeds it fixed timesteps from real frame time and
//! turns key presses into paddle, pause and reset commands.

use crate::consts::*;
use crate::settings::{Action, Settings};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Key transition delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Game instance holding all mutable state
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    accumulator: f32,
    /// Set when the score changed and the label needs redrawing
    score_dirty: bool,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed),
            settings,
            accumulator: 0.0,
            score_dirty: true,
        }
    }

    /// Run as many fixed ticks as `dt` seconds of real time cover
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.state, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if events.iter().any(|e| matches!(e, GameEvent::Scored { .. })) {
            self.score_dirty = true;
        }
        events
    }

    /// Map a raw key to an action and apply it
    pub fn handle_key(&mut self, key: &str, key_state: KeyState) {
        if let Some(action) = self.settings.action_for_key(key) {
            self.handle_action(action, key_state);
        }
    }

    /// Paddle actions steer on press and halt on release; pause and reset fire
    /// on release
    pub fn handle_action(&mut self, action: Action, key_state: KeyState) {
        match (action, key_state) {
            (Action::PaddleUp(side), KeyState::Pressed) => self.state.paddle_mut(side).up(),
            (Action::PaddleDown(side), KeyState::Pressed) => self.state.paddle_mut(side).down(),
            (Action::PaddleUp(side) | Action::PaddleDown(side), KeyState::Released) => {
                self.state.paddle_mut(side).halt()
            }
            (Action::TogglePause, KeyState::Released) => self.toggle_pause(),
            (Action::Reset, KeyState::Released) => self.reset(),
            (Action::ToggleFps, KeyState::Released) => self.toggle_fps(),
            (Action::TogglePause | Action::Reset | Action::ToggleFps, KeyState::Pressed) => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        match self.state.phase {
            GamePhase::Running => log::info!("Resumed"),
            GamePhase::Paused => log::info!("Paused"),
        }
    }

    /// Flip the FPS counter and persist the choice
    pub fn toggle_fps(&mut self) {
        self.settings.show_fps = !self.settings.show_fps;
        self.settings.save();
        log::info!("FPS counter {}", if self.settings.show_fps { "on" } else { "off" });
    }

    /// Pause only if currently running (focus loss)
    pub fn auto_pause(&mut self) {
        if self.state.is_running() {
            self.state.phase = GamePhase::Paused;
            log::info!("Auto-paused");
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.accumulator = 0.0;
        self.score_dirty = true;
        log::info!("Game reset (seed {})", self.state.seed);
    }

    /// Current score text
    pub fn score_label(&self) -> String {
        self.state.score.label()
    }

    /// Whether the score changed since the last call
    pub fn take_score_changed(&mut self) -> bool {
        std::mem::take(&mut self.score_dirty)
    }
}
