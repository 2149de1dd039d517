//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grid::BrickGrid;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for Start / Exit
    Menu,
    /// Ball in play
    Playing,
    /// Every brick of the current level is gone (resolved before the next frame)
    LevelCleared,
    /// Ball fell out of the playfield (resolved before the next frame)
    GameOver,
}

/// Things that happened during a tick, drained by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    PaddleHit,
    BrickDestroyed { row: usize, col: usize },
    SpeedUp { score: u64 },
    LevelCleared { level: u32 },
    LevelStarted { level: u32 },
    BallLost { level: u32 },
    RunWon { score: u64 },
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per nominal frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the playfield centre heading up-right at `speed` per component
    pub fn at_start(speed: f32) -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(speed, -speed),
            radius: BALL_RADIUS,
        }
    }

    /// Add `amount` to the magnitude of both velocity components
    pub fn escalate(&mut self, amount: f32) {
        self.vel.x += amount.copysign(self.vel.x);
        self.vel.y += amount.copysign(self.vel.y);
    }
}

/// The player's paddle (y is fixed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PADDLE_START_X,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move the left edge to `x`, optionally keeping the paddle on screen
    pub fn move_to(&mut self, x: f32, clamp: bool) {
        self.x = if clamp {
            x.clamp(0.0, PLAYFIELD_WIDTH - self.width)
        } else {
            x
        };
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance rules for this state
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Current level, 1-based
    pub level: u32,
    /// Score for the current run
    pub score: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BrickGrid,
    /// Score value that last escalated ball speed
    pub last_escalation: Option<u64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the latest ticks
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state sitting in the menu
    pub fn new(tuning: Tuning) -> Self {
        let speed = tuning.level_start_speed(1);
        Self {
            tuning,
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            ball: Ball::at_start(speed),
            paddle: Paddle::default(),
            grid: BrickGrid::for_level(1),
            last_escalation: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Put the ball and paddle back at their start-of-level spots
    pub fn reset_ball_and_paddle(&mut self) {
        self.ball = Ball::at_start(self.tuning.level_start_speed(self.level));
        self.paddle = Paddle::default();
    }

    /// Award points (score never decreases)
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_sits_in_menu() {
        let state = GameState::default();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.grid.rows(), 3);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.paddle.x, 325.0);
        assert_eq!(state.paddle.y, 570.0);
    }

    #[test]
    fn test_escalate_grows_magnitude_both_directions() {
        let mut ball = Ball::at_start(4.0);
        ball.escalate(0.5);
        assert_eq!(ball.vel, Vec2::new(4.5, -4.5));

        ball.vel = Vec2::new(-3.0, 2.0);
        ball.escalate(0.5);
        assert_eq!(ball.vel, Vec2::new(-3.5, 2.5));
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::default();
        paddle.move_to(780.0, true);
        assert_eq!(paddle.x, 650.0);
        paddle.move_to(-40.0, true);
        assert_eq!(paddle.x, 0.0);
        paddle.move_to(780.0, false);
        assert_eq!(paddle.x, 780.0);
    }

    #[test]
    fn test_reset_uses_level_speed() {
        let mut state = GameState::default();
        state.level = 3;
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.paddle.x = 0.0;
        state.reset_ball_and_paddle();
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, -5.0));
        assert_eq!(state.paddle.x, 325.0);
    }
}
