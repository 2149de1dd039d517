//! Top-level frame driver
//!
//! `App` owns the camera, the hand tracker and the game state, and runs exactly
//! one strictly sequential iteration per `frame` call:
//! input events -> camera read -> hand tracking -> physics -> composition.
//! The platform loop (rAF in the browser, a limiter loop natively) only feeds
//! events and presents `frame_image()`.

use std::time::Duration;

use glam::Vec2;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::frame::Frame;
use crate::input::{InputEvent, paddle_target};
use crate::limiter::FrameLimiter;
use crate::menu::{Menu, MenuAction};
use crate::platform::{Camera, CameraError, HandTracker};
use crate::renderer::FrameComposer;
use crate::settings::{CameraFailurePolicy, Settings};
use crate::sim::{
    FRAME_DT, GameEvent, GamePhase, GameState, TickInput, resolve_phase, return_to_menu,
    start_run, tick,
};

/// Longest step a single frame may take with a variable timestep, in nominal frames
pub const MAX_FRAME_STEPS: f32 = 3.0;

/// Whether the platform loop should keep calling `App::frame`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Exit,
}

pub struct App<C: Camera, H: HandTracker> {
    camera: C,
    tracker: H,
    settings: Settings,
    /// Converts wall time into nominal frames for the variable timestep
    timestep: FrameLimiter,
    state: GameState,
    menu: Menu,
    composer: FrameComposer,
    /// Last known pointer position, for button hover
    pointer: Option<Vec2>,
    /// Score of the last run that ended by losing or winning
    last_score: u64,
    /// Frames dropped because the camera had nothing to give
    skipped_frames: u64,
    released: bool,
}

impl<C: Camera, H: HandTracker> App<C, H> {
    pub fn new(camera: C, tracker: H, settings: Settings) -> Self {
        let state = GameState::new(settings.tuning.clone());
        let mut composer = FrameComposer::new(settings.show_landmarks);
        let menu = Menu::default();
        composer.compose_menu(&menu, None, 0);
        log::info!(
            "App ready (max level {}, {} fps, camera failure: {})",
            settings.tuning.max_level,
            settings.fps(),
            settings.camera_failure.as_str()
        );
        Self {
            camera,
            tracker,
            timestep: FrameLimiter::new(settings.fps()),
            settings,
            state,
            menu,
            composer,
            pointer: None,
            last_score: 0,
            skipped_frames: 0,
            released: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tracker(&self) -> &H {
        &self.tracker
    }

    /// Most recently composed window image
    pub fn frame_image(&self) -> &Frame {
        self.composer.frame()
    }

    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    /// Camera released and tracker closed
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Run one loop iteration
    ///
    /// `elapsed` is the wall time since the previous call; it only matters
    /// with `Settings::variable_timestep`.
    pub fn frame(&mut self, events: &[InputEvent], elapsed: Duration) -> ControlFlow {
        if self.released {
            return ControlFlow::Exit;
        }

        for event in events {
            if self.handle_event(*event) == ControlFlow::Exit {
                return ControlFlow::Exit;
            }
        }

        match self.state.phase {
            GamePhase::Menu => {
                self.composer
                    .compose_menu(&self.menu, self.pointer, self.last_score);
            }
            GamePhase::Playing | GamePhase::LevelCleared | GamePhase::GameOver => {
                self.play_frame(elapsed);
            }
        }

        ControlFlow::Continue
    }

    fn handle_event(&mut self, event: InputEvent) -> ControlFlow {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.shutdown();
                return ControlFlow::Exit;
            }
            InputEvent::PointerMoved(p) => self.pointer = Some(p),
            InputEvent::Click(p) => {
                self.pointer = Some(p);
                if self.state.phase == GamePhase::Menu {
                    match self.menu.hit(p) {
                        Some(MenuAction::Start) => {
                            start_run(&mut self.state);
                            self.state.drain_events();
                        }
                        Some(MenuAction::Exit) => {
                            log::info!("Exit clicked");
                            self.shutdown();
                            return ControlFlow::Exit;
                        }
                        None => {}
                    }
                }
            }
            InputEvent::Escape => {
                if self.state.is_playing() {
                    log::info!("Escape: back to menu, score {} discarded", self.state.score);
                    return_to_menu(&mut self.state);
                    self.last_score = 0;
                }
            }
        }
        ControlFlow::Continue
    }

    fn play_frame(&mut self, elapsed: Duration) {
        let mut camera_frame = match self.camera.read() {
            Ok(frame) => frame,
            Err(err) => {
                self.on_camera_error(err);
                return;
            }
        };
        camera_frame.mirror_horizontal();

        let hands = self.tracker.detect(&camera_frame);
        let (w, h) = camera_frame.size();
        let paddle_x = paddle_target(&hands, w, h, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
        if paddle_x.is_none() {
            log::debug!("No hand this frame, paddle holds");
        }
        self.composer.update_camera(&camera_frame, &hands);

        let dt = if self.settings.variable_timestep {
            // A long pause (backgrounded tab) must not teleport the ball
            self.timestep.frames_in(elapsed).min(MAX_FRAME_STEPS)
        } else {
            FRAME_DT
        };
        tick(&mut self.state, &TickInput { paddle_x }, dt);
        let score = self.state.score;
        resolve_phase(&mut self.state);

        for event in self.state.drain_events() {
            log_event(&event);
        }

        if self.state.phase == GamePhase::Menu {
            self.last_score = score;
            self.composer
                .compose_menu(&self.menu, self.pointer, self.last_score);
        } else {
            self.composer.compose_playing(&self.state);
        }
    }

    fn on_camera_error(&mut self, err: CameraError) {
        self.skipped_frames += 1;
        // A camera that is still warming up is never a reason to leave the level
        if matches!(err, CameraError::NotReady) {
            log::debug!("Camera not ready, skipping frame");
            return;
        }
        match self.settings.camera_failure {
            CameraFailurePolicy::SkipFrame => {
                log::debug!("Skipping frame: {}", err);
            }
            CameraFailurePolicy::AbortToMenu => {
                log::warn!("Camera failed ({}), back to menu", err);
                return_to_menu(&mut self.state);
                self.last_score = 0;
                self.composer
                    .compose_menu(&self.menu, self.pointer, self.last_score);
            }
        }
    }

    /// Stop for good because the platform loop can't go on
    pub fn abort(&mut self, reason: &str) {
        log::error!("Stopping: {}", reason);
        self.shutdown();
    }

    /// Release the camera and close the tracker; safe to call more than once
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.tracker.close();
        self.camera.release();
        log::info!("Camera released");
    }
}

impl<C: Camera, H: HandTracker> Drop for App<C, H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::WallBounce | GameEvent::PaddleHit => log::trace!("{:?}", event),
        GameEvent::BrickDestroyed { row, col } => log::debug!("Brick ({}, {}) destroyed", row, col),
        GameEvent::SpeedUp { score } => log::info!("Ball speeds up at score {}", score),
        GameEvent::LevelCleared { level } => log::info!("Level {} cleared", level),
        GameEvent::LevelStarted { .. } => {}
        GameEvent::BallLost { level } => log::info!("Ball lost on level {}", level),
        GameEvent::RunWon { score } => log::info!("Run won with score {}", score),
    }
}
