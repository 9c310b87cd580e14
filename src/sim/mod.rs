//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only, one per court
//! - Fixed fixture resolution order
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod opponent;
pub mod serve;
pub mod state;
pub mod tick;

pub use collision::{Fixture, overlaps};
pub use geom::{BALL_RECT, BOTTOM_BAR_RECT, PADDLE_RECT, Rect, TOP_BAR_RECT};
pub use serve::{AccelMode, full_reset, serve};
pub use state::{Ball, GameState, Paddle, Player, RngState};
pub use tick::{PaddleInput, Rules, TickInput, TickOutcome, tick};
