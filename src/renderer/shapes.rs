//! Shape generation for 2D primitives
//!
//! Everything on the board is an axis-aligned rectangle in board coordinates
//! (origin bottom-left, y up).

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GameState, Score};

/// Dashes in the center line
const CENTER_DASHES: u32 = 20;
/// Thickness of the board frame and center line
const LINE_WIDTH: f32 = 2.0;

/// Two triangles covering the rectangle from `min` with the given size
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Board background, frame and dashed center line
pub fn board() -> Vec<Vertex> {
    let size = Vec2::new(BOARD_WIDTH, BOARD_HEIGHT);
    let mut vertices = rect(Vec2::ZERO, size, colors::BOARD);

    // Frame: bottom, top, left, right
    let horizontal = Vec2::new(BOARD_WIDTH, LINE_WIDTH);
    let vertical = Vec2::new(LINE_WIDTH, BOARD_HEIGHT);
    vertices.extend(rect(Vec2::ZERO, horizontal, colors::BOARD_LINE));
    vertices.extend(rect(
        Vec2::new(0.0, BOARD_HEIGHT - LINE_WIDTH),
        horizontal,
        colors::BOARD_LINE,
    ));
    vertices.extend(rect(Vec2::ZERO, vertical, colors::BOARD_LINE));
    vertices.extend(rect(
        Vec2::new(BOARD_WIDTH - LINE_WIDTH, 0.0),
        vertical,
        colors::BOARD_LINE,
    ));

    // Center line: dash, gap, dash, ...
    let step = BOARD_HEIGHT / CENTER_DASHES as f32;
    let dash = Vec2::new(LINE_WIDTH, step / 2.0);
    for i in 0..CENTER_DASHES {
        let min = Vec2::new((BOARD_WIDTH - LINE_WIDTH) / 2.0, i as f32 * step + step / 4.0);
        vertices.extend(rect(min, dash, colors::BOARD_LINE));
    }

    vertices
}

/// Horizontal anchor of a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// Text to draw at a board position
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec2,
    pub anchor: Anchor,
}

/// Score label, centered above the board
pub fn score_label(score: &Score) -> TextLabel {
    TextLabel {
        text: score.label(),
        position: SCORE_LABEL_POS.into(),
        anchor: Anchor::Center,
    }
}

/// Full scene: board, both paddles, then the ball on top
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = board();
    for paddle in &state.paddles {
        vertices.extend(rect(
            paddle.position.into(),
            Vec2::new(PADDLE_WIDTH, paddle.height),
            colors::PADDLE,
        ));
    }
    vertices.extend(rect(
        state.ball.position.into(),
        Vec2::new(BALL_WIDTH, BALL_HEIGHT),
        colors::BALL,
    ));
    vertices
}
