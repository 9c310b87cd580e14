//! Game state and core simulation types
//!
//! Everything that changes between steps lives in `GameState`. The random
//! source is owned next to it by the environment, never shared between
//! instances.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{BALL_RECT, PADDLE_RECT, Rect};
use crate::consts::*;
use crate::error::TennisError;

/// One side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Right paddle (x = 140), the learning agent
    One,
    /// Left paddle (x = 16), built-in opponent or second human
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = TennisError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(TennisError::InvalidPlayer(other)),
        }
    }
}

/// The ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// World-space bounding rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        BALL_RECT.translated(self.pos)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.rect().center_y()
    }
}

/// A paddle; only the vertical velocity component is ever non-zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Acceleration magnitude applied per step while a direction is held
    pub accel: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            accel: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        PADDLE_RECT.translated(self.pos)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.rect().center_y()
    }

    /// Accelerate vertically; `direction` is -1 (up), 0 or 1 (down)
    #[inline]
    pub fn push(&mut self, direction: f32) {
        self.vel = self.vel + Vec2::new(0.0, self.accel * direction);
    }

    /// Friction then speed limit, applied every step
    pub fn damp(&mut self) {
        self.vel.y = (self.vel.y * PADDLE_DAMPING).clamp(-PADDLE_MAX_SPEED, PADDLE_MAX_SPEED);
    }

    /// Keep the paddle on the court
    pub fn clamp_to_court(&mut self) {
        self.pos.y = self.pos.y.clamp(PADDLE_MIN_Y, PADDLE_MAX_Y);
    }
}

/// RNG seed wrapper; `stream` separates instances sharing a seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn with_stream(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete simulation state for one court
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    /// Right paddle
    pub p1: Paddle,
    /// Left paddle
    pub p2: Paddle,
    pub p1_score: u32,
    pub p2_score: u32,
    /// Steps taken in the current episode
    pub step_count: u64,
    /// Episode finished; the next step must start a new one
    pub done: bool,
}

impl GameState {
    /// Pre-serve placeholder: paddles at their spawn lines, ball at rest.
    /// `serve::full_reset` must run before the first step.
    pub fn new() -> Self {
        Self {
            ball: Ball {
                pos: Vec2::new(SERVE_BALL_X, SERVE_BALL_Y_CENTER as f32),
                vel: Vec2::ZERO,
            },
            p1: Paddle::new(PADDLE1_X, PADDLE1_Y),
            p2: Paddle::new(PADDLE2_X, PADDLE2_Y),
            p1_score: 0,
            p2_score: 0,
            step_count: 0,
            done: true,
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.p1_score,
            Player::Two => self.p2_score,
        }
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.p1,
            Player::Two => &self.p2,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::One => &mut self.p1,
            Player::Two => &mut self.p2,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
