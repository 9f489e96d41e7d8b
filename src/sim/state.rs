//! Game state and core simulation types
//!
//! Plain data only. Drawing lives in `renderer`, driving lives in `game`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::vector::Vector2;
use crate::consts::*;

/// Whether the simulation is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Frozen: drawable but static (initial state, and after every point)
    Paused,
    /// Physics advancing every tick
    Running,
}

/// Which side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Index into `GameState::paddles`
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Vertical movement of a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalDirection {
    Up,
    Down,
    #[default]
    Halt,
}

impl VerticalDirection {
    /// Sign applied to paddle speed (y axis points up)
    pub fn sign(self) -> f32 {
        match self {
            VerticalDirection::Up => 1.0,
            VerticalDirection::Down => -1.0,
            VerticalDirection::Halt => 0.0,
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Bottom-left corner
    pub position: Vector2,
    pub height: f32,
    pub direction: VerticalDirection,
    /// Pixels per second
    pub speed: f32,
}

impl Paddle {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            height: PADDLE_HEIGHT,
            direction: VerticalDirection::Halt,
            speed: PADDLE_SPEED,
        }
    }

    /// Starting paddle for a side
    pub fn at_start(side: Side) -> Self {
        match side {
            Side::Left => Self::new(LEFT_PADDLE_START.into()),
            Side::Right => Self::new(RIGHT_PADDLE_START.into()),
        }
    }

    pub fn up(&mut self) {
        self.direction = VerticalDirection::Up;
    }

    pub fn down(&mut self) {
        self.direction = VerticalDirection::Down;
    }

    pub fn halt(&mut self) {
        self.direction = VerticalDirection::Halt;
    }

    /// Highest y the paddle's bottom edge may reach
    #[inline]
    pub fn max_y(&self) -> f32 {
        BOARD_HEIGHT - self.height
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Bottom-left corner
    pub position: Vector2,
    /// Direction of travel; components lie roughly in [-1, 1], not normalized
    pub direction: Vector2,
    /// Pixels per second
    pub speed: f32,
}

impl Ball {
    /// Fresh ball at `position` heading in a random direction
    pub fn spawn(position: Vector2, rng: &mut impl Rng) -> Self {
        let dir_x = (-0.5 + rng.random::<f32>()) * 2.0;
        let dir_y = -0.5 + rng.random::<f32>();
        Self {
            position,
            direction: Vector2::new(dir_x, dir_y),
            speed: BALL_SPEED,
        }
    }

    /// Fresh ball at the center of the board
    pub fn centered(rng: &mut impl Rng) -> Self {
        Self::spawn(BALL_START.into(), rng)
    }

    /// Velocity in pixels per second
    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.direction.scale(self.speed)
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    /// Credit one point to `side`
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// Text shown above the board
    pub fn label(&self) -> String {
        format!("{} : {}", self.left, self.right)
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball was turned around by a paddle
    PaddleHit { side: Side },
    /// Ball left the board; `scorer` gained a point
    Scored { scorer: Side, score: Score },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Left paddle at index 0, right paddle at index 1
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub score: Score,
    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new, paused game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::centered(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Paused,
            paddles: [Paddle::at_start(Side::Left), Paddle::at_start(Side::Right)],
            ball,
            score: Score::default(),
            time_ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    /// Flip between paused and running
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Running => GamePhase::Paused,
        };
    }

    /// Back to a paused 0 : 0 game with paddles and ball at their starts.
    /// The RNG keeps its stream so each reset serves a new direction.
    pub fn reset(&mut self) {
        self.score = Score::default();
        self.ball = Ball::centered(&mut self.rng);
        self.paddles = [Paddle::at_start(Side::Left), Paddle::at_start(Side::Right)];
        self.phase = GamePhase::Paused;
    }

    /// Replace the ball with a fresh centered one
    pub fn respawn_ball(&mut self) {
        self.ball = Ball::centered(&mut self.rng);
    }
}
