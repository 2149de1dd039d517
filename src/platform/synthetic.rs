//! Deterministic capabilities for the native demo and tests
//!
//! - `SyntheticCamera`: gradient frames with an optional failure schedule
//! - `ScriptedHands`: replays a fixed fingertip sequence
//! - `SweepingHand`: a fingertip sweeping side to side with seeded jitter

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Camera, CameraError, Hand, HandTracker, Landmark};
use crate::frame::{Frame, rgb};

/// Shared counters for observing a camera after it has been moved into the app
#[derive(Debug, Clone, Default)]
pub struct CameraProbe {
    reads: Rc<Cell<u64>>,
    releases: Rc<Cell<u32>>,
}

impl CameraProbe {
    /// Successful and failed read attempts
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }

    /// Calls to `release`
    pub fn releases(&self) -> u32 {
        self.releases.get()
    }

    pub fn is_released(&self) -> bool {
        self.releases.get() > 0
    }
}

/// Camera that paints a horizontal gradient, brighter on the left
pub struct SyntheticCamera {
    width: usize,
    height: usize,
    frame_index: u64,
    /// Read attempts (0-based) that fail
    failures: Vec<u64>,
    /// Read attempts (0-based) made before the device has a frame
    not_ready: Vec<u64>,
    released: bool,
    probe: CameraProbe,
}

impl SyntheticCamera {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frame_index: 0,
            failures: Vec::new(),
            not_ready: Vec::new(),
            released: false,
            probe: CameraProbe::default(),
        }
    }

    /// Fail the given read attempts
    pub fn failing_on(mut self, attempts: impl IntoIterator<Item = u64>) -> Self {
        self.failures.extend(attempts);
        self
    }

    /// Report `NotReady` on the given read attempts
    pub fn not_ready_on(mut self, attempts: impl IntoIterator<Item = u64>) -> Self {
        self.not_ready.extend(attempts);
        self
    }

    pub fn probe(&self) -> CameraProbe {
        self.probe.clone()
    }

    fn paint(&self) -> Frame {
        let mut frame = Frame::new(self.width, self.height, 0);
        let shift = (self.frame_index % 64) as usize;
        for y in 0..self.height {
            for x in 0..self.width {
                let v = (255 - (x * 255 / self.width.max(1))) as u8;
                let g = ((y + shift) * 255 / (self.height + 64).max(1)) as u8;
                frame.pixels[y * self.width + x] = rgb(v, g, 96);
            }
        }
        frame
    }
}

impl Camera for SyntheticCamera {
    fn read(&mut self) -> Result<Frame, CameraError> {
        if self.released {
            return Err(CameraError::Released);
        }
        let attempt = self.frame_index;
        self.frame_index += 1;
        self.probe.reads.set(self.probe.reads.get() + 1);

        if self.not_ready.contains(&attempt) {
            return Err(CameraError::NotReady);
        }
        if self.failures.contains(&attempt) {
            return Err(CameraError::ReadFailed(format!("scripted failure #{}", attempt)));
        }
        Ok(self.paint())
    }

    fn release(&mut self) {
        if !self.released {
            log::info!("Synthetic camera released after {} reads", self.frame_index);
        }
        self.released = true;
        self.probe.releases.set(self.probe.releases.get() + 1);
    }
}

/// Replays one fingertip (or no hand) per `detect` call
#[derive(Debug, Default)]
pub struct ScriptedHands {
    script: VecDeque<Option<Landmark>>,
    closed: bool,
}

impl ScriptedHands {
    pub fn new(script: impl IntoIterator<Item = Option<Landmark>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl HandTracker for ScriptedHands {
    fn detect(&mut self, _frame: &Frame) -> Vec<Hand> {
        match self.script.pop_front().flatten() {
            Some(tip) if !self.closed => vec![Hand::with_fingertip(tip)],
            _ => Vec::new(),
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Fingertip gliding left and right across the frame with noise
pub struct SweepingHand {
    rng: Pcg32,
    frame: u64,
    period_frames: u64,
    jitter: f32,
    /// Every n-th frame loses the hand (0 = never)
    dropout_every: u64,
}

impl SweepingHand {
    pub fn new(seed: u64, period_frames: u64, jitter: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            period_frames: period_frames.max(2),
            jitter: jitter.abs(),
            dropout_every: 0,
        }
    }

    pub fn with_dropouts(mut self, every: u64) -> Self {
        self.dropout_every = every;
        self
    }
}

impl HandTracker for SweepingHand {
    fn detect(&mut self, _frame: &Frame) -> Vec<Hand> {
        let n = self.frame;
        self.frame += 1;
        if self.dropout_every > 0 && n % self.dropout_every == 0 {
            return Vec::new();
        }

        let phase = (n % self.period_frames) as f32 / self.period_frames as f32;
        let triangle = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        let noise = self.rng.random_range(-self.jitter..=self.jitter);
        let x = (triangle + noise).clamp(0.0, 1.0);
        vec![Hand::with_fingertip(Landmark::new(x, 0.6))]
    }
}
