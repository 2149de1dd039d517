//! Platform abstraction layer
//!
//! The game loop talks to the outside world through two capabilities:
//! - `Camera`: produces colour frames on demand
//! - `HandTracker`: turns a frame into zero or more hands of normalized landmarks
//!
//! Implementations:
//! - `synthetic`: deterministic stand-ins for the native demo and tests
//! - `web` (wasm32): getUserMedia camera, MediaPipe hand landmarker, DOM events

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{INDEX_FINGERTIP, LANDMARKS_PER_HAND};
use crate::frame::Frame;

pub mod synthetic;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Why a camera read produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Device hasn't delivered a decodable frame yet
    NotReady,
    /// Read failed (device unplugged, stream ended, ...)
    ReadFailed(String),
    /// Camera was already released
    Released,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NotReady => write!(f, "camera not ready"),
            CameraError::ReadFailed(reason) => write!(f, "camera read failed: {}", reason),
            CameraError::Released => write!(f, "camera already released"),
        }
    }
}

impl std::error::Error for CameraError {}

/// A video source
pub trait Camera {
    /// Grab the next frame
    fn read(&mut self) -> Result<Frame, CameraError>;
    /// Give the device back. Must be safe to call more than once.
    fn release(&mut self);
}

/// One tracked point, coordinates normalized to the frame (0..1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position in pixels of a `width` x `height` frame
    pub fn to_pixels(&self, width: usize, height: usize) -> Vec2 {
        Vec2::new(self.x * width as f32, self.y * height as f32)
    }
}

/// The ordered landmark set of one detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// A full hand with every landmark at the same spot except the index fingertip
    pub fn with_fingertip(tip: Landmark) -> Self {
        let mut landmarks = vec![Landmark::new(tip.x, (tip.y + 0.2).min(1.0)); LANDMARKS_PER_HAND];
        landmarks[INDEX_FINGERTIP] = tip;
        Self { landmarks }
    }

    /// Index fingertip, if the model returned enough landmarks
    pub fn index_fingertip(&self) -> Option<Landmark> {
        self.landmarks.get(INDEX_FINGERTIP).copied()
    }
}

/// Split a flat `[x0, y0, x1, y1, ...]` landmark list into hands of 21 points
///
/// A trailing partial hand is dropped.
pub fn hands_from_flat(coords: &[f32]) -> Vec<Hand> {
    coords
        .chunks_exact(LANDMARKS_PER_HAND * 2)
        .map(|hand| {
            Hand::new(
                hand.chunks_exact(2)
                    .map(|p| Landmark::new(p[0], p[1]))
                    .collect(),
            )
        })
        .collect()
}

/// A hand-pose model
pub trait HandTracker {
    /// Detect hands in an already mirrored frame
    fn detect(&mut self, frame: &Frame) -> Vec<Hand>;
    /// Close any tracking session. Must be safe to call more than once.
    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hands_from_flat() {
        let mut coords: Vec<f32> = (0..LANDMARKS_PER_HAND * 2).map(|i| i as f32 / 100.0).collect();
        coords.extend(std::iter::repeat_n(0.9, LANDMARKS_PER_HAND * 2));
        coords.extend([0.1, 0.2, 0.3]);

        let hands = hands_from_flat(&coords);
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].landmarks.len(), LANDMARKS_PER_HAND);
        assert_eq!(hands[0].index_fingertip(), Some(Landmark::new(0.16, 0.17)));
        assert_eq!(hands[1].index_fingertip(), Some(Landmark::new(0.9, 0.9)));
        assert!(hands_from_flat(&[]).is_empty());
    }

    #[test]
    fn test_fingertip_lookup() {
        let hand = Hand::with_fingertip(Landmark::new(0.25, 0.5));
        assert_eq!(hand.landmarks.len(), 21);
        assert_eq!(hand.index_fingertip(), Some(Landmark::new(0.25, 0.5)));

        let short = Hand::new(vec![Landmark::new(0.1, 0.1); 5]);
        assert_eq!(short.index_fingertip(), None);
    }

    #[test]
    fn test_landmark_to_pixels() {
        let p = Landmark::new(0.5, 0.25).to_pixels(640, 480);
        assert_eq!(p, Vec2::new(320.0, 120.0));
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(CameraError::NotReady.to_string(), "camera not ready");
        assert_eq!(
            CameraError::ReadFailed("ended".into()).to_string(),
            "camera read failed: ended"
        );
    }
}
