//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Paddles always iterated left then right
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;
pub mod vector;

pub use state::{
    Ball, GameEvent, GamePhase, GameState, Paddle, Score, Side, VerticalDirection,
};
pub use tick::{move_ball, move_paddles, tick};
pub use vector::{MathError, Vector2};
