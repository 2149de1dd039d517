//! Frame-rate limiter
//!
//! Native loops sleep off whatever is left of the frame budget; the browser
//! loop is driven by requestAnimationFrame and instead skips callbacks that
//! arrive before the next frame is due.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame_duration: Duration,
    /// Timestamp (ms) of the last frame let through by `should_run`
    last_run_ms: Option<f64>,
    #[cfg(not(target_arch = "wasm32"))]
    frame_start: Option<std::time::Instant>,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            last_run_ms: None,
            #[cfg(not(target_arch = "wasm32"))]
            frame_start: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Time still to wait after a frame that took `elapsed`
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_duration.saturating_sub(elapsed)
    }

    /// Elapsed time expressed in nominal frames
    pub fn frames_in(&self, elapsed: Duration) -> f32 {
        (elapsed.as_secs_f64() / self.frame_duration.as_secs_f64()) as f32
    }

    /// Whether an animation-frame callback at `now_ms` should run a game frame
    ///
    /// Returns the elapsed time since the previous game frame when it should.
    pub fn should_run(&mut self, now_ms: f64) -> Option<Duration> {
        let budget_ms = self.frame_duration.as_secs_f64() * 1000.0;
        match self.last_run_ms {
            None => {
                self.last_run_ms = Some(now_ms);
                Some(self.frame_duration)
            }
            // 1 ms slack so a 60 Hz display isn't halved by timer jitter
            Some(last) if now_ms - last + 1.0 >= budget_ms => {
                self.last_run_ms = Some(now_ms);
                Some(Duration::from_secs_f64(((now_ms - last) / 1000.0).max(0.0)))
            }
            Some(_) => None,
        }
    }

    /// Mark the start of a frame (native loop)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn begin(&mut self) {
        self.frame_start = Some(std::time::Instant::now());
    }

    /// Sleep until the frame budget started by `begin` is spent
    ///
    /// Returns the full frame time, including the wait.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(&mut self) -> Duration {
        let Some(start) = self.frame_start.take() else {
            return self.frame_duration;
        };
        let remaining = self.remaining(start.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        start.elapsed()
    }
}
