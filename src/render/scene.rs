//! Scene compositor
//!
//! Turns a `GameState` into the observation frame. Nothing drawn here
//! overlaps, so draw order only matters for ties at the court edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::digits::{P1_SCORE, P2_SCORE, draw_score};
use super::{Color, Renderer};
use crate::rect_vertices;
use crate::sim::{BALL_RECT, BOTTOM_BAR_RECT, GameState, PADDLE_RECT, Rect, TOP_BAR_RECT};

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    /// Ball and court bars
    pub white: Color,
    pub p1: Color,
    pub p2: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb8(144, 72, 17),
            white: Color::rgb8(236, 236, 236),
            p1: Color::rgb8(92, 186, 92),
            p2: Color::rgb8(213, 130, 74),
        }
    }
}

fn fill_rect(renderer: &mut dyn Renderer, rect: &Rect, offset: Vec2, color: Color) {
    renderer.draw_polygon(&rect_vertices(rect, offset), color);
}

/// Render the full frame and read it back
pub fn compose(renderer: &mut dyn Renderer, state: &GameState, palette: &Palette) -> Vec<u8> {
    renderer.reset(palette.background);

    draw_score(renderer, state.p2_score, P2_SCORE, palette.p2);
    draw_score(renderer, state.p1_score, P1_SCORE, palette.p1);

    fill_rect(renderer, &BALL_RECT, state.ball.pos, palette.white);
    fill_rect(renderer, &PADDLE_RECT, state.p1.pos, palette.p1);
    fill_rect(renderer, &PADDLE_RECT, state.p2.pos, palette.p2);
    fill_rect(renderer, &BOTTOM_BAR_RECT, Vec2::ZERO, palette.white);
    fill_rect(renderer, &TOP_BAR_RECT, Vec2::ZERO, palette.white);

    renderer.get_image()
}
