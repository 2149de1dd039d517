//! Finger Breaker - a brick breaker steered by hand tracking
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, game state)
//! - `input`: Fingertip-to-paddle mapping and input events
//! - `renderer`: Software frame composer plus WebGPU presentation
//! - `platform`: Camera / hand-tracking capabilities (browser, synthetic)
//! - `menu`: Start / Exit buttons and hit testing
//! - `frame`: Pixel buffer shared by camera capture and composition
//! - `limiter`: Frame-rate limiting for native and browser loops
//! - `app`: Menu <-> playing state machine driving one frame at a time
//! - `tuning` / `settings`: Data-driven game balance and preferences

pub mod app;
pub mod frame;
pub mod input;
pub mod limiter;
pub mod menu;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{App, ControlFlow};
pub use frame::Frame;
pub use settings::{CameraFailurePolicy, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (logical units)
    pub const WINDOW_WIDTH: u32 = 1200;
    pub const WINDOW_HEIGHT: u32 = 600;

    /// Playfield occupies the left part of the window
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Camera preview panel occupies the right part
    pub const CAMERA_PANEL_X: u32 = 800;
    pub const CAMERA_PANEL_WIDTH: u32 = 400;
    pub const CAMERA_PANEL_HEIGHT: u32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_Y: f32 = PLAYFIELD_HEIGHT - 30.0;
    pub const PADDLE_START_X: f32 = PLAYFIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = PLAYFIELD_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0;

    /// Brick grid
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: f32 = PLAYFIELD_WIDTH / BRICK_COLUMNS as f32;
    pub const BRICK_HEIGHT: f32 = 30.0;
    /// Rows added on top of the level number
    pub const BRICK_EXTRA_ROWS: u32 = 2;

    /// Hand landmark layout (MediaPipe hand model)
    pub const LANDMARKS_PER_HAND: usize = 21;
    pub const INDEX_FINGERTIP: usize = 8;

    /// Score text anchor (inside the camera panel)
    pub const SCORE_TEXT_X: i32 = 808;
    pub const SCORE_TEXT_Y: i32 = 15;
}
