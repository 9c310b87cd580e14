//! Collision detection and bounce response
//!
//! Discrete per-step test: the ball's rectangle is checked against each
//! fixture after integration. Touching edges count as contact. There is no
//! swept test, so a fast ball can skip a thin fixture.

use glam::Vec2;

use super::geom::{BOTTOM_BAR_RECT, Rect, TOP_BAR_RECT};
use super::state::{Ball, GameState, Player};
use crate::consts::{BOUNCE_FLAT_ZONE, BOUNCE_MID_ZONE};

/// What the ball ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    Paddle(Player),
    BottomBar,
    TopBar,
}

/// Closed-interval overlap of `[a1, a2]` and `[b1, b2]`
#[inline]
pub fn intervals_overlap(a1: f32, a2: f32, b1: f32, b2: f32) -> bool {
    assert!(
        a1 <= a2 && b1 <= b2,
        "inverted interval: [{a1}, {a2}] vs [{b1}, {b2}]"
    );
    a1 <= b2 && b1 <= a2
}

/// Axis-aligned overlap; shared edges count
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    intervals_overlap(a.x, a.right(), b.x, b.right())
        && intervals_overlap(a.y, a.bottom(), b.y, b.bottom())
}

/// Bar contact: flat horizontal bounce
#[inline]
pub fn bar_bounce(vel: Vec2) -> Vec2 {
    Vec2::new(vel.x, -vel.y)
}

/// Paddle contact: the ball velocity is replaced, not reflected.
///
/// Vertical speed comes from three zones by distance between centers
/// (0 within 2px, 1 within 4px, 2 beyond), pointing away from the paddle
/// center. Horizontal speed is always 1, back toward the opponent.
pub fn paddle_bounce(paddle_center_y: f32, ball_center_y: f32, side: Player) -> Vec2 {
    let diff_y = paddle_center_y - ball_center_y;
    let dist_y = diff_y.abs();

    let mut v_y = if dist_y <= BOUNCE_FLAT_ZONE {
        0.0
    } else if dist_y <= BOUNCE_MID_ZONE {
        1.0
    } else {
        2.0
    };
    if diff_y > 0.0 {
        // ball hit the upper half, send it upward
        v_y = -v_y;
    }

    let v_x = match side {
        Player::One => -1.0,
        Player::Two => 1.0,
    };
    Vec2::new(v_x, v_y)
}

/// Fixtures in resolution order with their world-space rectangles
pub fn fixtures(state: &GameState) -> [(Fixture, Rect); 4] {
    [
        (Fixture::Paddle(Player::One), state.p1.rect()),
        (Fixture::Paddle(Player::Two), state.p2.rect()),
        (Fixture::BottomBar, BOTTOM_BAR_RECT),
        (Fixture::TopBar, TOP_BAR_RECT),
    ]
}

/// Apply the response of one fixture to the ball
pub fn respond(ball: &mut Ball, fixture: Fixture, fixture_rect: &Rect) {
    ball.vel = match fixture {
        Fixture::BottomBar | Fixture::TopBar => bar_bounce(ball.vel),
        Fixture::Paddle(side) => paddle_bounce(fixture_rect.center_y(), ball.center_y(), side),
    };
}

/// Resolve every contact in fixed order. Each fixture responds at most once
/// and all simultaneous contacts apply. Returns the fixtures that were hit.
pub fn resolve(state: &mut GameState) -> Vec<Fixture> {
    let mut hits = Vec::new();
    for (fixture, rect) in fixtures(state) {
        if overlaps(&state.ball.rect(), &rect) {
            respond(&mut state.ball, fixture, &rect);
            hits.push(fixture);
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::{BALL_RECT, PADDLE_RECT};
    use proptest::prelude::*;

    fn state_with_ball(pos: Vec2, vel: Vec2) -> GameState {
        let mut state = GameState::new();
        state.ball.pos = pos;
        state.ball.vel = vel;
        state
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 2.0, 4.0);
        let b = Rect::new(2.0, 4.0, 1.0, 1.0);
        assert!(overlaps(&a, &b));

        let c = Rect::new(2.5, 0.0, 1.0, 1.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    #[should_panic(expected = "inverted interval")]
    fn test_inverted_interval_panics() {
        intervals_overlap(3.0, 1.0, 0.0, 2.0);
    }

    #[test]
    fn test_bounce_magnitude_table() {
        // ball center sits `d` away from the paddle center, both directions
        for side in [Player::One, Player::Two] {
            for (dist, expected) in [(1.0, 0.0), (3.0, 1.0), (6.0, 2.0)] {
                let below = paddle_bounce(100.0, 100.0 + dist, side);
                assert_eq!(below.y, expected, "ball below center, dist {dist}");
                let above = paddle_bounce(100.0, 100.0 - dist, side);
                assert_eq!(above.y, -expected, "ball above center, dist {dist}");
            }
        }
    }

    #[test]
    fn test_zone_boundaries_inclusive() {
        assert_eq!(paddle_bounce(100.0, 102.0, Player::One).y, 0.0);
        assert_eq!(paddle_bounce(100.0, 104.0, Player::One).y, 1.0);
        assert_eq!(paddle_bounce(100.0, 104.5, Player::One).y, 2.0);
    }

    #[test]
    fn test_paddle_bounce_horizontal_direction() {
        assert_eq!(paddle_bounce(100.0, 100.0, Player::One), Vec2::new(-1.0, 0.0));
        assert_eq!(paddle_bounce(100.0, 100.0, Player::Two), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_paddle_contact_replaces_velocity() {
        let mut state = state_with_ball(Vec2::ZERO, Vec2::new(1.7, 0.3));
        state.p1.pos = Vec2::new(140.0, 100.0);
        // ball center 2px above paddle center (108)
        state.ball.pos = Vec2::new(139.0, 104.0);
        let hits = resolve(&mut state);
        assert_eq!(hits, vec![Fixture::Paddle(Player::One)]);
        assert_eq!(state.ball.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_bar_contact_flips_vertical_only() {
        let mut state = state_with_ball(Vec2::new(80.0, 193.0), Vec2::new(1.25, 0.75));
        let hits = resolve(&mut state);
        assert_eq!(hits, vec![Fixture::BottomBar]);
        assert_eq!(state.ball.vel, Vec2::new(1.25, -0.75));

        let mut state = state_with_ball(Vec2::new(80.0, 33.0), Vec2::new(-0.5, -1.5));
        let hits = resolve(&mut state);
        assert_eq!(hits, vec![Fixture::TopBar]);
        assert_eq!(state.ball.vel, Vec2::new(-0.5, 1.5));
    }

    #[test]
    fn test_simultaneous_contacts_all_apply() {
        // paddle 1 pushed into the bottom bar, ball touching both
        let mut state = state_with_ball(Vec2::new(139.0, 200.0), Vec2::new(1.0, 1.0));
        state.p1.pos = Vec2::new(140.0, 200.0);
        let hits = resolve(&mut state);
        assert_eq!(hits, vec![Fixture::Paddle(Player::One), Fixture::BottomBar]);
        // paddle sends it up (-1, -2), then the bar flips it back down
        assert_eq!(state.ball.vel, Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_no_contact_leaves_velocity() {
        let mut state = state_with_ball(Vec2::new(78.0, 110.0), Vec2::new(0.5, 0.5));
        assert!(resolve(&mut state).is_empty());
        assert_eq!(state.ball.vel, Vec2::new(0.5, 0.5));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -50.0f32..200.0, ay in -50.0f32..250.0,
            bx in -50.0f32..200.0, by in -50.0f32..250.0,
        ) {
            let a = BALL_RECT.translated(Vec2::new(ax, ay));
            let b = PADDLE_RECT.translated(Vec2::new(bx, by));
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_paddle_bounce_levels(paddle_y in 0.0f32..210.0, ball_y in 0.0f32..210.0) {
            let v = paddle_bounce(paddle_y, ball_y, Player::Two);
            prop_assert_eq!(v.x, 1.0);
            prop_assert!([-2.0, -1.0, 0.0, 1.0, 2.0].contains(&v.y));
        }
    }
}
