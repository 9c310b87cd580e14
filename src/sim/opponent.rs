//! Built-in opponent for paddle 2
//!
//! Purely reactive: chases the ball's current vertical center with a small
//! dead zone, no trajectory prediction.

use super::state::{Ball, Paddle};
use crate::consts::OPPONENT_DEAD_ZONE;

/// Direction the opponent wants to push: -1 (up), 0 (hold) or 1 (down)
pub fn decide(paddle: &Paddle, ball: &Ball) -> f32 {
    let diff = paddle.center_y() - ball.center_y();
    if diff.abs() < OPPONENT_DEAD_ZONE {
        0.0
    } else if diff > 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Accelerate the paddle toward the ball
pub fn drive(paddle: &mut Paddle, ball: &Ball) {
    let direction = decide(paddle, ball);
    if direction != 0.0 {
        paddle.push(direction);
    }
}
