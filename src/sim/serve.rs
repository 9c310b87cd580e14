//! Serve and reset logic
//!
//! After each point the ball is re-served from the middle of the table with a
//! random direction and speed. A full reset (episode boundary) also moves
//! paddle 1 back to its spawn line.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Player};
use crate::consts::*;
use crate::deg_to_rad;

/// How paddle accelerations are chosen on each serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccelMode {
    /// Both paddles draw a fresh magnitude from `[ACCEL_MIN, ACCEL_MAX)`
    #[default]
    Sampled,
    /// Fixed magnitudes; the built-in opponent gets a slightly lower one
    Fixed,
}

/// Serve angle window in degrees for the receiving side
pub fn serve_angle_range(serve_to: Player, p1_y: f32) -> (f32, f32) {
    match serve_to {
        Player::Two => (135.0, 225.0),
        Player::One if p1_y > SERVE_MIDLINE_Y => (0.0, 45.0),
        Player::One => (315.0, 360.0),
    }
}

/// Re-serve the ball toward `serve_to`.
///
/// With `full_reset`, paddle 1 is also respawned. Paddle 2 is respawned on
/// every serve. The angle window is picked from paddle 1's position before
/// it moves.
pub fn serve<R: Rng>(
    state: &mut GameState,
    serve_to: Player,
    full_reset: bool,
    accel_mode: AccelMode,
    p2_human: bool,
    rng: &mut R,
) {
    let y_min = SERVE_BALL_Y_CENTER - SERVE_BALL_Y_HALF_WIDTH;
    let y_max = SERVE_BALL_Y_CENTER + SERVE_BALL_Y_HALF_WIDTH;
    let ball_y = rng.random_range(y_min..y_max) as f32;
    state.ball.pos = Vec2::new(SERVE_BALL_X, ball_y);

    let (start, end) = serve_angle_range(serve_to, state.p1.pos.y);
    let angle = rng.random_range(deg_to_rad(start)..deg_to_rad(end));
    let dir = Vec2::new(angle.cos(), angle.sin());
    state.ball.vel = dir * rng.random_range(SERVE_MIN_SPEED..SERVE_MAX_SPEED);

    if full_reset {
        state.p1.pos = Vec2::new(
            PADDLE1_X,
            PADDLE1_Y + rng.random_range(-PADDLE_JITTER..PADDLE_JITTER),
        );
        state.p1.vel = Vec2::ZERO;
    }

    match accel_mode {
        AccelMode::Sampled => {
            state.p1.accel = rng.random_range(ACCEL_MIN..ACCEL_MAX);
            state.p2.accel = rng.random_range(ACCEL_MIN..ACCEL_MAX);
        }
        AccelMode::Fixed => {
            state.p1.accel = FIXED_ACCEL;
            state.p2.accel = if p2_human {
                FIXED_ACCEL
            } else {
                FIXED_OPPONENT_ACCEL
            };
        }
    }

    state.p2.pos = Vec2::new(
        PADDLE2_X,
        PADDLE2_Y + rng.random_range(-PADDLE_JITTER..PADDLE_JITTER),
    );
    state.p2.vel = Vec2::ZERO;

    log::debug!(
        "serve to {:?} (full reset: {}) ball {:?} vel {:?}",
        serve_to,
        full_reset,
        state.ball.pos,
        state.ball.vel
    );
}

/// Start a new episode: scores and step counter cleared, serve to player 2
pub fn full_reset<R: Rng>(
    state: &mut GameState,
    accel_mode: AccelMode,
    p2_human: bool,
    rng: &mut R,
) {
    serve(state, Player::Two, true, accel_mode, p2_human, rng);
    state.p1_score = 0;
    state.p2_score = 0;
    state.step_count = 0;
    state.done = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;
    use proptest::prelude::*;

    /// Angle of the ball velocity in degrees, normalized to [0, 360)
    fn serve_angle(state: &GameState) -> f32 {
        let a = state.ball.vel.y.atan2(state.ball.vel.x).to_degrees();
        if a < 0.0 { a + 360.0 } else { a }
    }

    #[test]
    fn test_serve_to_player_two_angles() {
        let mut rng = RngState::new(1).to_rng();
        let mut state = GameState::new();
        for _ in 0..500 {
            serve(&mut state, Player::Two, false, AccelMode::Sampled, false, &mut rng);
            let a = serve_angle(&state);
            assert!((134.99..=225.01).contains(&a), "angle {a}");
            assert!(state.ball.vel.x < 0.0);
        }
    }

    #[test]
    fn test_serve_to_player_one_depends_on_paddle() {
        let mut rng = RngState::new(2).to_rng();
        let mut state = GameState::new();
        for _ in 0..500 {
            state.p1.pos.y = 150.0;
            serve(&mut state, Player::One, false, AccelMode::Sampled, false, &mut rng);
            let a = serve_angle(&state);
            assert!(a <= 45.01, "low paddle angle {a}");

            state.p1.pos.y = 60.0;
            serve(&mut state, Player::One, false, AccelMode::Sampled, false, &mut rng);
            let a = serve_angle(&state);
            assert!(a >= 314.99 || a < 0.01, "high paddle angle {a}");
        }
    }

    #[test]
    fn test_serve_ball_and_paddle_placement() {
        let mut rng = RngState::new(3).to_rng();
        let mut state = GameState::new();
        for _ in 0..500 {
            serve(&mut state, Player::Two, true, AccelMode::Sampled, false, &mut rng);
            assert_eq!(state.ball.pos.x, SERVE_BALL_X);
            assert!((63.0..167.0).contains(&state.ball.pos.y));
            assert_eq!(state.ball.pos.y.fract(), 0.0);

            let speed = state.ball.vel.length();
            assert!((0.49..=2.01).contains(&speed), "speed {speed}");

            assert_eq!(state.p1.pos.x, PADDLE1_X);
            assert!((158.0..=178.0).contains(&state.p1.pos.y));
            assert_eq!(state.p2.pos.x, PADDLE2_X);
            assert!((105.0..=125.0).contains(&state.p2.pos.y));
            assert!((ACCEL_MIN..ACCEL_MAX).contains(&state.p1.accel));
            assert!((ACCEL_MIN..ACCEL_MAX).contains(&state.p2.accel));
        }
    }

    #[test]
    fn test_partial_serve_keeps_paddle_one() {
        let mut rng = RngState::new(4).to_rng();
        let mut state = GameState::new();
        state.p1.pos = Vec2::new(PADDLE1_X, 42.0);
        state.p1.vel = Vec2::new(0.0, 1.5);
        state.p2.vel = Vec2::new(0.0, -1.5);
        serve(&mut state, Player::One, false, AccelMode::Sampled, false, &mut rng);
        assert_eq!(state.p1.pos.y, 42.0);
        assert_eq!(state.p1.vel.y, 1.5);
        assert_eq!(state.p2.vel, Vec2::ZERO);
    }

    #[test]
    fn test_fixed_accel_mode() {
        let mut rng = RngState::new(5).to_rng();
        let mut state = GameState::new();
        serve(&mut state, Player::Two, true, AccelMode::Fixed, false, &mut rng);
        assert_eq!(state.p1.accel, FIXED_ACCEL);
        assert_eq!(state.p2.accel, FIXED_OPPONENT_ACCEL);

        serve(&mut state, Player::Two, true, AccelMode::Fixed, true, &mut rng);
        assert_eq!(state.p2.accel, FIXED_ACCEL);
    }

    #[test]
    fn test_full_reset_clears_episode() {
        let mut rng = RngState::new(6).to_rng();
        let mut state = GameState::new();
        state.p1_score = 20;
        state.p2_score = 7;
        state.step_count = 99;
        full_reset(&mut state, AccelMode::Sampled, false, &mut rng);
        assert_eq!((state.p1_score, state.p2_score, state.step_count), (0, 0, 0));
        assert!(!state.done);
        assert!(state.ball.vel.x < 0.0);
    }

    proptest! {
        #[test]
        fn prop_serve_windows(seed in any::<u64>(), p1_y in 24.0f32..210.0) {
            let mut rng = RngState::new(seed).to_rng();
            let mut state = GameState::new();
            state.p1.pos.y = p1_y;
            serve(&mut state, Player::One, false, AccelMode::Sampled, false, &mut rng);
            let a = serve_angle(&state);
            if p1_y > SERVE_MIDLINE_Y {
                prop_assert!(a <= 45.01);
            } else {
                prop_assert!(a >= 314.99 || a < 0.01);
            }
        }
    }
}
