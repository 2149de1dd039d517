//! Collision detection and response for the rectangular playfield
//!
//! All tests here are pure functions over positions and rectangles so the
//! physics step can be exercised without a window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::BrickGrid;

/// Axis-aligned rectangle, origin at the top-left, y grows downward
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

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point test, left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Which walls the ball touched this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Bounce the ball off the side and top walls of a playfield `width` wide.
///
/// The velocity component is pointed away from the wall rather than negated, so
/// a ball still overlapping a wall never flips back. The ball is pushed back
/// inside the playfield in the same call. The bottom edge is open.
pub fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32) -> WallContact {
    let mut contact = WallContact::default();

    if pos.x - radius < 0.0 {
        vel.x = vel.x.abs();
        pos.x = radius;
        contact.left = true;
    } else if pos.x + radius > width {
        vel.x = -vel.x.abs();
        pos.x = width - radius;
        contact.right = true;
    }

    if pos.y - radius < 0.0 {
        vel.y = vel.y.abs();
        pos.y = radius;
        contact.top = true;
    }

    contact
}

/// Ball's lower edge inside the paddle's vertical band and centre within its span
pub fn ball_paddle_overlap(pos: Vec2, radius: f32, paddle: &Rect) -> bool {
    let bottom = pos.y + radius;
    paddle.y < bottom && bottom < paddle.bottom() && paddle.x < pos.x && pos.x < paddle.right()
}

/// Ball's upper edge inside the brick's vertical band and centre within its span
pub fn ball_brick_overlap(pos: Vec2, radius: f32, brick: &Rect) -> bool {
    let top = pos.y - radius;
    brick.x < pos.x && pos.x < brick.right() && brick.y < top && top < brick.bottom()
}

/// First present brick the ball overlaps, scanning row-major
pub fn first_brick_hit(grid: &BrickGrid, pos: Vec2, radius: f32) -> Option<(usize, usize)> {
    grid.present_cells()
        .find(|&(row, col)| ball_brick_overlap(pos, radius, &BrickGrid::brick_rect(row, col)))
}

/// Ball has dropped past the bottom of the playfield
pub fn ball_lost(pos: Vec2, height: f32) -> bool {
    pos.y > height
}
