//! Score digits built from filled bars
//!
//! Each glyph is 12x20 pixels made of 4px wide segments.

use glam::Vec2;

use super::{Color, Renderer};
use crate::rect_vertices;
use crate::sim::Rect;

const fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x, y, w, h)
}

/// Segment rectangles for each digit, relative to the glyph origin
pub const DIGITS: [&[Rect]; 10] = [
    &[r(0., 0., 12., 4.), r(0., 16., 12., 4.), r(0., 0., 4., 20.), r(8., 0., 4., 20.)],
    &[r(4., 0., 4., 20.)],
    &[
        r(0., 0., 12., 4.),
        r(0., 8., 12., 4.),
        r(0., 16., 12., 4.),
        r(8., 0., 4., 12.),
        r(0., 8., 4., 12.),
    ],
    &[r(0., 0., 12., 4.), r(0., 16., 12., 4.), r(8., 0., 4., 20.), r(4., 8., 8., 4.)],
    &[r(0., 0., 4., 12.), r(8., 0., 4., 20.), r(0., 8., 12., 4.)],
    &[
        r(0., 0., 12., 4.),
        r(0., 8., 12., 4.),
        r(0., 16., 12., 4.),
        r(0., 0., 4., 12.),
        r(8., 8., 4., 12.),
    ],
    &[r(0., 0., 4., 20.), r(0., 8., 12., 4.), r(0., 16., 12., 4.), r(8., 8., 4., 12.)],
    &[r(0., 0., 12., 4.), r(8., 0., 4., 20.)],
    &[
        r(0., 0., 12., 4.),
        r(0., 8., 12., 4.),
        r(0., 16., 12., 4.),
        r(0., 0., 4., 20.),
        r(8., 0., 4., 20.),
    ],
    &[r(0., 0., 12., 4.), r(0., 0., 4., 12.), r(8., 0., 4., 20.), r(0., 8., 12., 4.)],
];

/// Where a player's score is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePlacement {
    pub ones: Vec2,
    pub tens: Vec2,
}

/// Player 1 (right side)
pub const P1_SCORE: ScorePlacement = ScorePlacement {
    ones: Vec2::new(116.0, 1.0),
    tens: Vec2::new(100.0, 1.0),
};

/// Player 2 (left side)
pub const P2_SCORE: ScorePlacement = ScorePlacement {
    ones: Vec2::new(36.0, 1.0),
    tens: Vec2::new(20.0, 1.0),
};

/// Draw one digit (0-9) with its origin at `pos`
pub fn draw_digit(renderer: &mut dyn Renderer, digit: u32, pos: Vec2, color: Color) {
    assert!(digit < 10, "not a single digit: {digit}");
    for rect in DIGITS[digit as usize] {
        renderer.draw_polygon(&rect_vertices(rect, pos), color);
    }
}

/// Draw a score; the tens digit only appears from 10 upward
pub fn draw_score(renderer: &mut dyn Renderer, score: u32, placement: ScorePlacement, color: Color) {
    draw_digit(renderer, score % 10, placement.ones, color);
    if score >= 10 {
        draw_digit(renderer, (score / 10) % 10, placement.tens, color);
    }
}
