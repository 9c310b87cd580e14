//! Computer Tennis - a deterministic ball-and-paddle RL environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, serve, opponent)
//! - `render`: Renderer capability, CPU/GPU backends, scene compositor
//! - `env`: Step/act interfaces (single instance and batched)
//! - `settings`: Construction configuration

pub mod env;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use env::{Action, Batch, Observation, Step, StepInfo, TennisEnv, VecEnv};
pub use error::{Result, TennisError};
pub use render::{Backend, Color, Renderer};
pub use settings::{AccelMode, EnvConfig, ResetMode};

use glam::Vec2;

use sim::Rect;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels); the court is not configurable
    pub const SCREEN_WIDTH: u32 = 160;
    pub const SCREEN_HEIGHT: u32 = 210;
    /// Observation channels (RGB)
    pub const CHANNELS: usize = 3;

    /// Default score that ends an episode
    pub const MAX_SCORE: u32 = 20;

    /// Number of buttons in an action vector
    pub const NUM_BUTTONS: usize = 8;
    pub const BUTTON_UP: usize = 4;
    pub const BUTTON_DOWN: usize = 5;

    /// Paddle vertical velocity damping per step (friction)
    pub const PADDLE_DAMPING: f32 = 0.8;
    /// Paddle vertical speed limit (pixels/step)
    pub const PADDLE_MAX_SPEED: f32 = 2.0;
    /// Paddle vertical position bounds
    pub const PADDLE_MIN_Y: f32 = 24.0;
    pub const PADDLE_MAX_Y: f32 = SCREEN_HEIGHT as f32;

    /// Paddle acceleration range, resampled on every serve
    pub const ACCEL_MIN: f32 = 0.1;
    pub const ACCEL_MAX: f32 = 2.0;
    /// Fixed accelerations (used when accelerations are not sampled)
    pub const FIXED_ACCEL: f32 = 1.0;
    /// Built-in opponent is slightly slower so single player stays winnable
    pub const FIXED_OPPONENT_ACCEL: f32 = 0.9;

    /// Opponent controller dead zone (pixels)
    pub const OPPONENT_DEAD_ZONE: f32 = 2.0;

    /// Paddle hit zones: vertical offset thresholds from paddle center
    pub const BOUNCE_FLAT_ZONE: f32 = 2.0;
    pub const BOUNCE_MID_ZONE: f32 = 4.0;

    /// Serve geometry
    pub const SERVE_BALL_X: f32 = 78.0;
    pub const SERVE_BALL_Y_CENTER: i32 = 115;
    pub const SERVE_BALL_Y_HALF_WIDTH: i32 = SCREEN_HEIGHT as i32 / 4;
    pub const SERVE_MIN_SPEED: f32 = 0.5;
    pub const SERVE_MAX_SPEED: f32 = 2.0;
    /// Paddle 1 position above this line gets the downward serve window
    pub const SERVE_MIDLINE_Y: f32 = 100.0;

    /// Paddle spawn positions
    pub const PADDLE1_X: f32 = 140.0;
    pub const PADDLE1_Y: f32 = 168.0;
    pub const PADDLE2_X: f32 = 16.0;
    pub const PADDLE2_Y: f32 = 115.0;
    pub const PADDLE_JITTER: f32 = 10.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees / 180.0 * std::f32::consts::PI
}

/// Corner sequence of a rectangle translated by `offset` (clockwise in screen space)
#[inline]
pub fn rect_vertices(rect: &Rect, offset: Vec2) -> [Vec2; 4] {
    let r = rect.translated(offset);
    [
        Vec2::new(r.x, r.y),
        Vec2::new(r.x + r.w, r.y),
        Vec2::new(r.x + r.w, r.y + r.h),
        Vec2::new(r.x, r.y + r.h),
    ]
}
