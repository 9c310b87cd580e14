//! Axis-aligned rectangle geometry
//!
//! A `Rect` is either a static fixture (court bars, digit segments) or the
//! local shape of a moving entity, translated by the entity position before
//! any overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Move the rectangle by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            w: self.w,
            h: self.h,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Vertical midpoint
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

/// Local shape of the ball
pub const BALL_RECT: Rect = Rect::new(0.0, 0.0, 2.0, 4.0);
/// Local shape of both paddles
pub const PADDLE_RECT: Rect = Rect::new(0.0, 0.0, 4.0, 16.0);
/// Bottom court bar (static)
pub const BOTTOM_BAR_RECT: Rect = Rect::new(
    0.0,
    crate::consts::SCREEN_HEIGHT as f32 - 16.0,
    crate::consts::SCREEN_WIDTH as f32,
    16.0,
);
/// Top court bar (static)
pub const TOP_BAR_RECT: Rect = Rect::new(0.0, 24.0, crate::consts::SCREEN_WIDTH as f32, 10.0);
