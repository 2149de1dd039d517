//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One explicit Euler step per tick
//! - Stable iteration order (row-major bricks)
//! - No rendering, camera or platform dependencies

pub mod collision;
pub mod grid;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Rect, WallContact, ball_brick_overlap, ball_paddle_overlap, bounce_off_walls};
pub use grid::BrickGrid;
pub use level::{LevelOutcome, advance_level, resolve_phase, return_to_menu, start_level, start_run};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{FRAME_DT, TickInput, tick};
