//! Rendering module
//!
//! Frames are composed in software (`compose`, `draw`, `font`) and presented
//! through WebGPU as a single full-screen texture (`pipeline`).

pub mod compose;
pub mod draw;
pub mod font;
pub mod pipeline;

pub use compose::FrameComposer;
pub use pipeline::FramePresenter;

/// Colors for game elements
pub mod colors {
    use crate::frame::rgb;

    pub const WHITE: u32 = rgb(255, 255, 255);
    pub const BLACK: u32 = rgb(0, 0, 0);
    pub const PADDLE: u32 = rgb(0, 0, 255);
    pub const BALL: u32 = rgb(255, 0, 0);
    pub const BRICK: u32 = rgb(0, 255, 0);
    pub const BUTTON: u32 = rgb(50, 150, 250);
    pub const BUTTON_HOVER: u32 = rgb(100, 200, 255);
    pub const LANDMARK_DOT: u32 = rgb(255, 48, 48);
    pub const LANDMARK_LINE: u32 = rgb(224, 224, 224);
}
