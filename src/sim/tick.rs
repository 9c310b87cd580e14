//! Fixed timestep simulation tick
//!
//! Advances one court by exactly one step. Rendering happens afterwards in
//! the environment; this module never touches pixels.

use rand::Rng;

use super::collision::{self, Fixture};
use super::opponent;
use super::serve::{self, AccelMode};
use super::state::{GameState, Player};
use crate::consts::*;

/// Held buttons for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

impl PaddleInput {
    /// -1 (up), 0, or 1 (down); pressing both cancels out
    pub fn direction(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub p1: PaddleInput,
    /// Second human; `None` hands paddle 2 to the built-in opponent
    pub p2: Option<PaddleInput>,
}

/// Per-court rules fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub max_score: u32,
    pub accel_mode: AccelMode,
    pub p2_human: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_score: MAX_SCORE,
            accel_mode: AccelMode::Sampled,
            p2_human: false,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// From player 1's point of view: +1 scored, -1 conceded
    pub reward: f32,
    pub scorer: Option<Player>,
    pub hits: Vec<Fixture>,
    pub done: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Panics if the episode is already over; the caller must reset first.
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rules: &Rules, rng: &mut R) -> TickOutcome {
    assert!(!state.done, "tick on a finished episode; reset before stepping");

    // Input
    state.p1.push(input.p1.direction());
    match input.p2 {
        Some(p2) => state.p2.push(p2.direction()),
        None => opponent::drive(&mut state.p2, &state.ball),
    }

    // Friction and speed limit
    state.p1.damp();
    state.p2.damp();

    // Integrate
    state.ball.pos = state.ball.pos + state.ball.vel;
    state.p1.pos = state.p1.pos + state.p1.vel;
    state.p2.pos = state.p2.pos + state.p2.vel;

    state.p1.clamp_to_court();
    state.p2.clamp_to_court();

    let hits = collision::resolve(state);

    let ball_x = state.ball.pos.x;
    if ball_x < 0.0 || ball_x > SCREEN_WIDTH as f32 {
        state.ball.vel.x = -state.ball.vel.x;
    }

    let scorer = if ball_x < 0.0 {
        Some(Player::One)
    } else if ball_x > SCREEN_WIDTH as f32 {
        Some(Player::Two)
    } else {
        None
    };

    let mut reward = 0.0;
    if let Some(player) = scorer {
        let score = match player {
            Player::One => {
                reward = 1.0;
                state.p1_score += 1;
                state.p1_score
            }
            Player::Two => {
                reward = -1.0;
                state.p2_score += 1;
                state.p2_score
            }
        };
        log::debug!(
            "{:?} scored ({} - {}) at step {}",
            player,
            state.p1_score,
            state.p2_score,
            state.step_count
        );
        if score >= rules.max_score {
            state.done = true;
        }
        serve::serve(state, player.other(), false, rules.accel_mode, rules.p2_human, rng);
    }

    state.step_count += 1;

    TickOutcome {
        reward,
        scorer,
        hits,
        done: state.done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;
    use glam::Vec2;
    use proptest::prelude::*;

    fn fresh(seed: u64) -> (GameState, rand_pcg::Pcg32) {
        let mut rng = RngState::new(seed).to_rng();
        let mut state = GameState::new();
        serve::full_reset(&mut state, AccelMode::Sampled, false, &mut rng);
        (state, rng)
    }

    fn hold(up: bool, down: bool) -> TickInput {
        TickInput {
            p1: PaddleInput { up, down },
            p2: None,
        }
    }

    #[test]
    fn test_both_buttons_cancel() {
        assert_eq!(PaddleInput { up: true, down: true }.direction(), 0.0);
        assert_eq!(PaddleInput { up: true, down: false }.direction(), -1.0);
        assert_eq!(PaddleInput { up: false, down: true }.direction(), 1.0);
        assert_eq!(PaddleInput::default().direction(), 0.0);
    }

    #[test]
    fn test_up_moves_paddle_one_up() {
        let (mut state, mut rng) = fresh(11);
        let start = state.p1.pos.y;
        tick(&mut state, &hold(true, false), &Rules::default(), &mut rng);
        let expected_vel = (-state.p1.accel * PADDLE_DAMPING).max(-PADDLE_MAX_SPEED);
        assert!((state.p1.vel.y - expected_vel).abs() < 1e-5);
        assert!(state.p1.pos.y < start);
    }

    #[test]
    fn test_player_one_scores_on_left_exit() {
        let (mut state, mut rng) = fresh(12);
        state.ball.pos = Vec2::new(0.5, 100.0);
        state.ball.vel = Vec2::new(-1.0, 0.0);
        let out = tick(&mut state, &TickInput::default(), &Rules::default(), &mut rng);
        assert_eq!(out.reward, 1.0);
        assert_eq!(out.scorer, Some(Player::One));
        assert_eq!(state.p1_score, 1);
        assert!(!out.done);
        // re-served toward player 2
        assert_eq!(state.ball.pos.x, SERVE_BALL_X);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_player_two_scores_on_right_exit() {
        let (mut state, mut rng) = fresh(13);
        state.ball.pos = Vec2::new(159.5, 60.0);
        state.ball.vel = Vec2::new(1.0, 0.0);
        state.p1.pos.y = 180.0;
        let out = tick(&mut state, &TickInput::default(), &Rules::default(), &mut rng);
        assert_eq!(out.reward, -1.0);
        assert_eq!(state.p2_score, 1);
        // re-served toward player 1
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_done_at_max_score() {
        let (mut state, mut rng) = fresh(14);
        let rules = Rules {
            max_score: 3,
            ..Default::default()
        };
        state.p1_score = 2;
        state.ball.pos = Vec2::new(0.5, 100.0);
        state.ball.vel = Vec2::new(-1.0, 0.0);
        let out = tick(&mut state, &TickInput::default(), &rules, &mut rng);
        assert!(out.done);
        assert!(state.done);
        assert_eq!(state.p1_score, 3);
    }

    #[test]
    #[should_panic(expected = "finished episode")]
    fn test_tick_after_done_panics() {
        let (mut state, mut rng) = fresh(15);
        state.done = true;
        tick(&mut state, &TickInput::default(), &Rules::default(), &mut rng);
    }

    #[test]
    fn test_human_paddle_two_ignores_opponent() {
        let (mut state, mut rng) = fresh(16);
        let rules = Rules {
            p2_human: true,
            ..Default::default()
        };
        state.ball.pos = Vec2::new(78.0, 40.0);
        let input = TickInput {
            p1: PaddleInput::default(),
            p2: Some(PaddleInput::default()),
        };
        tick(&mut state, &input, &rules, &mut rng);
        assert_eq!(state.p2.vel.y, 0.0);
    }

    #[test]
    fn test_thousand_idle_steps() {
        let (mut state, mut rng) = fresh(17);
        let rules = Rules::default();
        for _ in 0..1000 {
            if state.done {
                serve::full_reset(&mut state, rules.accel_mode, false, &mut rng);
            }
            let (p1, p2) = (state.p1_score, state.p2_score);
            let out = tick(&mut state, &TickInput::default(), &rules, &mut rng);
            match out.scorer {
                Some(Player::One) => assert_eq!((state.p1_score, out.reward), (p1 + 1, 1.0)),
                Some(Player::Two) => assert_eq!((state.p2_score, out.reward), (p2 + 1, -1.0)),
                None => assert_eq!((state.p1_score, state.p2_score, out.reward), (p1, p2, 0.0)),
            }
        }
    }

    #[test]
    fn test_determinism() {
        let (mut state1, mut rng1) = fresh(99999);
        let (mut state2, mut rng2) = fresh(99999);
        let inputs = [hold(true, false), hold(false, true), hold(true, true), hold(false, false)];
        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            if state1.done {
                serve::full_reset(&mut state1, AccelMode::Sampled, false, &mut rng1);
                serve::full_reset(&mut state2, AccelMode::Sampled, false, &mut rng2);
            }
            let a = tick(&mut state1, input, &Rules::default(), &mut rng1);
            let b = tick(&mut state2, input, &Rules::default(), &mut rng2);
            assert_eq!(a, b);
        }
        assert_eq!(state1, state2);
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_on_court(
            seed in any::<u64>(),
            presses in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..300),
        ) {
            let (mut state, mut rng) = fresh(seed);
            let rules = Rules::default();
            for (up, down) in presses {
                if state.done {
                    serve::full_reset(&mut state, rules.accel_mode, false, &mut rng);
                }
                tick(&mut state, &hold(up, down), &rules, &mut rng);
                for paddle in [&state.p1, &state.p2] {
                    prop_assert!((PADDLE_MIN_Y..=PADDLE_MAX_Y).contains(&paddle.pos.y));
                }
            }
        }
    }
}
