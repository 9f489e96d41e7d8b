//! Fixed timestep simulation tick
//!
//! Advances paddles and ball, resolves wall and paddle contact, and handles
//! scoring. Runs only while the game is `Running`.

use super::state::{GameEvent, GamePhase, GameState, Side};
use super::vector::Vector2;
use crate::consts::*;

/// Advance the game state by one timestep, returning what happened
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    assert!(dt >= 0.0, "negative timestep: {dt}");

    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    move_paddles(state, dt);
    move_ball(state, dt, &mut events);
    events
}

/// Move every paddle along y and keep it on the board
pub fn move_paddles(state: &mut GameState, dt: f32) {
    for paddle in &mut state.paddles {
        let y = paddle.position.y + paddle.direction.sign() * paddle.speed * dt;
        let y = y.clamp(0.0, paddle.max_y());
        paddle.position = paddle.position.with_y(y);
    }
}

/// Move the ball, bouncing off walls and paddles, and score when it leaves
/// the board
pub fn move_ball(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    let next = ball.position.add(ball.velocity().scale(dt));
    let (x, mut y) = (next.x, next.y);

    // Top and bottom walls. Only the bottom edge pins the position; a ball
    // past the top keeps its overshoot and is turned around next tick.
    if y < 0.0 {
        y = 0.0;
        ball.direction = ball.direction.with_y(-ball.direction.y);
        events.push(GameEvent::WallBounce);
    } else if y > BOARD_HEIGHT - BALL_HEIGHT {
        ball.direction = ball.direction.with_y(-ball.direction.y);
        events.push(GameEvent::WallBounce);
    }

    // Paddle contact zone. Every paddle spanning y turns the ball, so two
    // paddles at the same height cancel each other out.
    if x <= LEFT_CONTACT_X || x >= RIGHT_CONTACT_X {
        for (paddle, side) in state.paddles.iter().zip([Side::Left, Side::Right]) {
            if y > paddle.position.y && y < paddle.position.y + paddle.height {
                // Measured from the paddle's bottom edge minus half its height
                let paddle_center = paddle.position.y - paddle.height / 2.0;
                let dir_x = -ball.direction.x;
                let dir_y = ball.direction.y + SPIN_FACTOR * (paddle_center - y);
                ball.direction = Vector2::new(dir_x, dir_y);
                events.push(GameEvent::PaddleHit { side });
                log::debug!("Paddle hit ({:?}) at y={:.1}", side, y);
            }
        }
    }

    // Out past the left or right edge: the other side scores
    let exited = if x < 0.0 {
        Some(Side::Left)
    } else if x > BOARD_WIDTH - BALL_WIDTH {
        Some(Side::Right)
    } else {
        None
    };
    if let Some(exited) = exited {
        score_point(state, exited.opponent(), events);
        return;
    }

    state.ball.position = Vector2::new(x, y);
}

/// Credit `scorer`, serve a new ball and freeze the game
fn score_point(state: &mut GameState, scorer: Side, events: &mut Vec<GameEvent>) {
    state.respawn_ball();
    state.score.award(scorer);
    state.phase = GamePhase::Paused;
    log::info!("Point to {:?} - score {}", scorer, state.score.label());
    events.push(GameEvent::Scored {
        scorer,
        score: state.score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, Paddle, Score, VerticalDirection};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.phase = GamePhase::Running;
        state
    }

    fn place_ball(state: &mut GameState, pos: (f32, f32), dir: (f32, f32)) {
        state.ball = Ball {
            position: pos.into(),
            direction: dir.into(),
            speed: BALL_SPEED,
        };
    }

    #[test]
    fn test_paddle_moves_up() {
        let mut state = running_state();
        state.paddles[0].position = Vector2::new(10.0, 0.0);
        state.paddles[0].up();

        move_paddles(&mut state, 0.1);
        assert!((state.paddles[0].position.y - 20.0).abs() < 1e-4);
        assert_eq!(state.paddles[0].position.x, 10.0);
    }

    #[test]
    fn test_paddle_clamped_at_top() {
        let mut state = running_state();
        state.paddles[0].position = Vector2::new(10.0, 390.0);
        state.paddles[0].up();

        move_paddles(&mut state, 0.1);
        assert_eq!(state.paddles[0].position.y, 360.0);
    }

    #[test]
    fn test_paddle_clamped_at_bottom() {
        let mut state = running_state();
        state.paddles[1].position = Vector2::new(622.0, 5.0);
        state.paddles[1].down();

        move_paddles(&mut state, 0.1);
        assert_eq!(state.paddles[1].position.y, 0.0);
    }

    #[test]
    fn test_halted_paddle_stays() {
        let mut state = running_state();
        move_paddles(&mut state, 0.5);
        assert_eq!(state.paddles[0], Paddle::at_start(Side::Left));
        assert_eq!(state.paddles[1], Paddle::at_start(Side::Right));
    }

    #[test]
    fn test_ball_moves_freely() {
        let mut state = running_state();
        place_ball(&mut state, (300.0, 200.0), (1.0, 0.5));
        let events = tick(&mut state, 0.1);

        assert!(events.is_empty());
        assert!((state.ball.position.x - 325.0).abs() < 1e-3);
        assert!((state.ball.position.y - 212.5).abs() < 1e-3);
    }

    #[test]
    fn test_exit_left_scores_right() {
        let mut state = running_state();
        state.score = Score { left: 2, right: 5 };
        place_ball(&mut state, (5.0, 200.0), (-1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert_eq!(state.score, Score { left: 2, right: 6 });
        assert_eq!(state.ball.position, Vector2::new(320.0, 200.0));
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(events.contains(&GameEvent::Scored {
            scorer: Side::Right,
            score: Score { left: 2, right: 6 },
        }));
    }

    #[test]
    fn test_exit_right_scores_left() {
        let mut state = running_state();
        place_ball(&mut state, (630.0, 300.0), (1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert_eq!(state.score, Score { left: 1, right: 0 });
        assert_eq!(state.ball.position, Vector2::new(320.0, 200.0));
        assert!(!state.is_running());
        assert!(matches!(
            events.last(),
            Some(GameEvent::Scored { scorer: Side::Left, .. })
        ));
    }

    #[test]
    fn test_score_serves_fresh_ball() {
        let mut state = running_state();
        place_ball(&mut state, (5.0, 300.0), (-1.0, 0.0));

        tick(&mut state, 0.1);

        // The opening serve took the first draw; the point takes the next
        let mut rng = Pcg32::seed_from_u64(12345);
        let _ = Ball::centered(&mut rng);
        let expected = Ball::centered(&mut rng);
        assert_eq!(state.ball, expected);
        assert_ne!(state.ball.direction, Vector2::new(-1.0, 0.0));
        assert!((-1.0..1.0).contains(&state.ball.direction.x));
        assert!((-0.5..0.5).contains(&state.ball.direction.y));
    }

    #[test]
    fn test_exit_through_paddle_range_still_scores() {
        let mut state = running_state();
        state.paddles[1].position = Vector2::new(622.0, 300.0);
        // Left paddle spans y 120..160; x' = -20 is already off the board
        place_ball(&mut state, (5.0, 150.0), (-1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert_eq!(
            events,
            vec![
                GameEvent::PaddleHit { side: Side::Left },
                GameEvent::Scored {
                    scorer: Side::Right,
                    score: Score { left: 0, right: 1 },
                },
            ]
        );
        assert_eq!(state.ball.position, Vector2::new(320.0, 200.0));
        assert!(!state.is_running());
    }

    #[test]
    fn test_bottom_wall_bounce_clamps() {
        let mut state = running_state();
        place_ball(&mut state, (300.0, 2.0), (0.0, -0.5));

        let events = tick(&mut state, 0.1);

        assert_eq!(state.ball.position.y, 0.0);
        assert_eq!(state.ball.direction.y, 0.5);
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_top_wall_bounce_keeps_overshoot() {
        let mut state = running_state();
        place_ball(&mut state, (300.0, 390.0), (0.0, 0.5));

        tick(&mut state, 0.1);

        assert_eq!(state.ball.direction.y, -0.5);
        assert!((state.ball.position.y - 402.5).abs() < 1e-3);
    }

    #[test]
    fn test_left_paddle_returns_ball() {
        let mut state = running_state();
        state.paddles[1].position = Vector2::new(622.0, 300.0);
        // Left paddle spans y 120..160
        place_ball(&mut state, (40.0, 150.0), (-1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert!(state.ball.direction.x > 0.0);
        // center = 120 - 20 = 100; nudge = 0.005 * (100 - 150) = -0.25
        assert!((state.ball.direction.y + 0.25).abs() < 1e-5);
        assert!((state.ball.position.x - 15.0).abs() < 1e-3);
        assert_eq!(events, vec![GameEvent::PaddleHit { side: Side::Left }]);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_aligned_paddles_both_turn_ball() {
        // Both paddles at their starts span y 120..160
        let mut state = running_state();
        place_ball(&mut state, (40.0, 150.0), (-1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert_eq!(state.ball.direction.x, -1.0);
        assert!((state.ball.direction.y + 0.5).abs() < 1e-5);
        assert_eq!(
            events,
            vec![
                GameEvent::PaddleHit { side: Side::Left },
                GameEvent::PaddleHit { side: Side::Right },
            ]
        );
    }

    #[test]
    fn test_far_paddle_turns_ball_in_near_zone() {
        let mut state = running_state();
        state.paddles[0].position = Vector2::new(10.0, 0.0);
        state.paddles[1].position = Vector2::new(622.0, 200.0);
        place_ball(&mut state, (40.0, 220.0), (-1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert_eq!(state.ball.direction.x, 1.0);
        // center = 200 - 20 = 180; nudge = 0.005 * (180 - 220) = -0.2
        assert!((state.ball.direction.y + 0.2).abs() < 1e-5);
        assert_eq!(events, vec![GameEvent::PaddleHit { side: Side::Right }]);
    }

    #[test]
    fn test_right_paddle_returns_ball() {
        let mut state = running_state();
        state.paddles[1].position = Vector2::new(622.0, 300.0);
        place_ball(&mut state, (600.0, 310.0), (1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert!(state.ball.direction.x < 0.0);
        assert!(events.contains(&GameEvent::PaddleHit { side: Side::Right }));
    }

    #[test]
    fn test_ball_misses_paddle() {
        let mut state = running_state();
        place_ball(&mut state, (40.0, 300.0), (-1.0, 0.0));

        let events = tick(&mut state, 0.1);

        assert!(state.ball.direction.x < 0.0);
        assert!(events.is_empty());
        assert!((state.ball.position.x - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_paused_tick_does_nothing() {
        let mut state = GameState::new(5);
        state.paddles[0].up();
        let before = (state.paddles.clone(), state.ball.clone());

        for _ in 0..100 {
            assert!(tick(&mut state, SIM_DT).is_empty());
        }

        assert_eq!(before, (state.paddles.clone(), state.ball.clone()));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    #[should_panic(expected = "negative timestep")]
    fn test_negative_dt_panics() {
        let mut state = running_state();
        tick(&mut state, -0.1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = running_state();
        let mut state2 = running_state();
        state1.paddles[1].down();
        state2.paddles[1].down();

        for _ in 0..2000 {
            if !state1.is_running() {
                state1.toggle_pause();
                state2.toggle_pause();
            }
            tick(&mut state1, SIM_DT);
            tick(&mut state2, SIM_DT);
        }

        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.time_ticks, state2.time_ticks);
    }

    fn direction_strategy() -> impl Strategy<Value = VerticalDirection> {
        prop_oneof![
            Just(VerticalDirection::Up),
            Just(VerticalDirection::Down),
            Just(VerticalDirection::Halt),
        ]
    }

    proptest! {
        #[test]
        fn paddle_always_on_board(
            start_y in 0.0f32..=360.0,
            dt in 0.0f32..5.0,
            direction in direction_strategy(),
        ) {
            let mut state = running_state();
            state.paddles[0].position = Vector2::new(10.0, start_y);
            state.paddles[0].direction = direction;
            move_paddles(&mut state, dt);
            let y = state.paddles[0].position.y;
            prop_assert!((0.0..=BOARD_HEIGHT - PADDLE_HEIGHT).contains(&y));
        }

        #[test]
        fn paused_ticks_freeze_world(ticks in 1usize..50, dt in 0.0f32..1.0) {
            let mut state = GameState::new(77);
            state.paddles[1].down();
            let paddles = state.paddles.clone();
            let ball = state.ball.clone();
            for _ in 0..ticks {
                tick(&mut state, dt);
            }
            prop_assert_eq!(paddles, state.paddles);
            prop_assert_eq!(ball, state.ball);
        }
    }
}
