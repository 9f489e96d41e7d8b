//! Classic Pong - two paddles, one ball, a 640x400 board
//!
//! Core modules:
//! - `sim`: Simulation (vector math, paddles, ball, scoring, pause/reset)
//! - `game`: Fixed-timestep driver and key handling around the simulation
//! - `renderer`: WebGPU rendering of the board, paddles and ball
//! - `settings`: Key bindings and HUD preferences

pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Action, KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (logical pixels, origin bottom-left, y up)
    pub const BOARD_WIDTH: f32 = 640.0;
    pub const BOARD_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 8.0;
    pub const PADDLE_HEIGHT: f32 = 40.0;
    pub const PADDLE_SPEED: f32 = BOARD_HEIGHT / 2.0; // px/s
    pub const LEFT_PADDLE_START: (f32, f32) = (10.0, 120.0);
    pub const RIGHT_PADDLE_START: (f32, f32) = (622.0, 120.0);

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 8.0;
    pub const BALL_HEIGHT: f32 = 8.0;
    pub const BALL_SPEED: f32 = 500.0 / 2.0; // px/s
    pub const BALL_START: (f32, f32) = (BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0);

    /// Ball x at or below this is at the left paddle's leading edge
    pub const LEFT_CONTACT_X: f32 = 18.0;
    /// Ball x at or above this is at the right paddle's leading edge
    pub const RIGHT_CONTACT_X: f32 = 614.0;
    /// How strongly an off-center hit bends the ball vertically
    pub const SPIN_FACTOR: f32 = 0.005;

    /// Score label anchor (centered above the board)
    pub const SCORE_LABEL_POS: (f32, f32) = (BOARD_WIDTH / 2.0, 405.0);
    /// Logical view height including the label strip above the board
    pub const VIEW_HEIGHT: f32 = 480.0;
}
