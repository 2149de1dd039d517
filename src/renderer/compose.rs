//! Frame composer
//!
//! Builds the full 1200x600 window image on the CPU: playfield on the left,
//! mirrored camera preview (with optional landmark overlay) on the right, score
//! text on top of the preview. The result is handed to a presenter as-is.

use glam::Vec2;

use super::colors;
use super::draw::{
    draw_line, draw_text, draw_text_centered, fill_circle, fill_rect, fill_rounded_rect,
    stroke_rect,
};
use crate::consts::*;
use crate::frame::Frame;
use crate::menu::Menu;
use crate::platform::Hand;
use crate::sim::{BrickGrid, GameState, Rect};

/// MediaPipe hand skeleton, as landmark index pairs
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

const SCORE_SCALE: i32 = 5;
const LEVEL_SCALE: i32 = 3;
const BUTTON_TEXT_SCALE: i32 = 4;
const BUTTON_RADIUS: f32 = 10.0;
const BRICK_OUTLINE: f32 = 2.0;
const LANDMARK_DOT: f32 = 4.0;

/// Owns the window image and the latest camera preview
pub struct FrameComposer {
    canvas: Frame,
    panel: Frame,
    show_landmarks: bool,
}

impl FrameComposer {
    pub fn new(show_landmarks: bool) -> Self {
        Self {
            canvas: Frame::new(
                WINDOW_WIDTH as usize,
                WINDOW_HEIGHT as usize,
                colors::WHITE,
            ),
            panel: Frame::new(
                CAMERA_PANEL_WIDTH as usize,
                CAMERA_PANEL_HEIGHT as usize,
                colors::BLACK,
            ),
            show_landmarks,
        }
    }

    /// Last composed image
    pub fn frame(&self) -> &Frame {
        &self.canvas
    }

    /// Camera preview as it will appear in the side panel
    pub fn panel(&self) -> &Frame {
        &self.panel
    }

    /// Menu screen: white background, two rounded buttons, optional last score
    pub fn compose_menu(&mut self, menu: &Menu, pointer: Option<Vec2>, last_score: u64) -> &Frame {
        self.canvas.fill(colors::WHITE);

        for button in menu.buttons() {
            let hovered = pointer.is_some_and(|p| button.rect.contains(p));
            let color = if hovered {
                colors::BUTTON_HOVER
            } else {
                colors::BUTTON
            };
            fill_rounded_rect(&mut self.canvas, &button.rect, BUTTON_RADIUS, color);
            draw_text_centered(
                &mut self.canvas,
                button.label,
                &button.rect,
                BUTTON_TEXT_SCALE,
                colors::WHITE,
            );
        }

        if last_score > 0 {
            let banner = Rect::new(0.0, 150.0, WINDOW_WIDTH as f32, 50.0);
            let text = format!("LAST SCORE: {}", last_score);
            draw_text_centered(&mut self.canvas, &text, &banner, LEVEL_SCALE, colors::BLACK);
        }

        &self.canvas
    }

    /// Replace the preview with a new (already mirrored) camera frame
    pub fn update_camera(&mut self, camera: &Frame, hands: &[Hand]) {
        self.panel = camera.resized(CAMERA_PANEL_WIDTH as usize, CAMERA_PANEL_HEIGHT as usize);
        if self.show_landmarks {
            draw_hands(&mut self.panel, hands);
        }
    }

    /// Playing screen
    pub fn compose_playing(&mut self, state: &GameState) -> &Frame {
        self.canvas.blit(&self.panel, CAMERA_PANEL_X as usize, 0);

        let playfield = Rect::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        fill_rect(&mut self.canvas, &playfield, colors::WHITE);

        fill_rect(&mut self.canvas, &state.paddle.rect(), colors::PADDLE);
        fill_circle(&mut self.canvas, state.ball.pos, state.ball.radius, colors::BALL);

        for (row, col) in state.grid.present_cells() {
            let brick = BrickGrid::brick_rect(row, col);
            fill_rect(&mut self.canvas, &brick, colors::BRICK);
            stroke_rect(&mut self.canvas, &brick, BRICK_OUTLINE, colors::BLACK);
        }

        let score = format!("SCORE: {}", state.score);
        draw_text(
            &mut self.canvas,
            &score,
            SCORE_TEXT_X,
            SCORE_TEXT_Y,
            SCORE_SCALE,
            colors::BLACK,
        );
        let level = format!("LEVEL {}", state.level);
        draw_text(
            &mut self.canvas,
            &level,
            SCORE_TEXT_X,
            SCORE_TEXT_Y + 50,
            LEVEL_SCALE,
            colors::BLACK,
        );

        &self.canvas
    }
}

/// Landmark dots and skeleton lines, in panel pixels
fn draw_hands(panel: &mut Frame, hands: &[Hand]) {
    let (w, h) = panel.size();
    for hand in hands {
        let points: Vec<Vec2> = hand.landmarks.iter().map(|l| l.to_pixels(w, h)).collect();
        for &(a, b) in &HAND_CONNECTIONS {
            if let (Some(&pa), Some(&pb)) = (points.get(a), points.get(b)) {
                draw_line(panel, pa, pb, colors::LANDMARK_LINE);
            }
        }
        for &p in &points {
            fill_circle(panel, p, LANDMARK_DOT, colors::LANDMARK_DOT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::rgb;
    use crate::platform::Landmark;
    use crate::sim::start_run;

    #[test]
    fn test_menu_hover_changes_button_colour() {
        let menu = Menu::default();
        let mut composer = FrameComposer::new(false);
        let probe = (menu.start.rect.x as usize + 5, menu.start.rect.y as usize + 35);

        composer.compose_menu(&menu, None, 0);
        assert_eq!(composer.frame().get(probe.0, probe.1), Some(colors::BUTTON));

        let inside = Vec2::new(menu.start.rect.x + 20.0, menu.start.rect.y + 20.0);
        composer.compose_menu(&menu, Some(inside), 0);
        assert_eq!(composer.frame().get(probe.0, probe.1), Some(colors::BUTTON_HOVER));
    }

    #[test]
    fn test_playing_draws_every_piece() {
        let mut state = GameState::default();
        start_run(&mut state);
        let mut composer = FrameComposer::new(false);
        let frame = composer.compose_playing(&state).clone();

        assert_eq!(frame.size(), (1200, 600));
        // Ball centre
        assert_eq!(frame.get(400, 300), Some(colors::BALL));
        // Paddle middle
        assert_eq!(frame.get(400, 580), Some(colors::PADDLE));
        // Brick interior and outline
        assert_eq!(frame.get(40, 15), Some(colors::BRICK));
        assert_eq!(frame.get(0, 0), Some(colors::BLACK));
        // Empty playfield
        assert_eq!(frame.get(100, 400), Some(colors::WHITE));
    }

    #[test]
    fn test_cleared_brick_is_not_drawn() {
        let mut state = GameState::default();
        start_run(&mut state);
        state.grid.clear(0, 0);
        let mut composer = FrameComposer::new(false);
        let frame = composer.compose_playing(&state);
        assert_eq!(frame.get(40, 15), Some(colors::WHITE));
    }

    #[test]
    fn test_camera_preview_fills_side_panel() {
        let state = {
            let mut s = GameState::default();
            start_run(&mut s);
            s
        };
        let purple = rgb(120, 0, 160);
        let camera = Frame::new(64, 48, purple);
        let mut composer = FrameComposer::new(false);
        composer.update_camera(&camera, &[]);
        let frame = composer.compose_playing(&state);
        assert_eq!(frame.get(1100, 500), Some(purple));
        assert_eq!(frame.get(1199, 599), Some(purple));
        // The playfield is not covered by the preview
        assert_eq!(frame.get(799, 500), Some(colors::WHITE));
    }

    #[test]
    fn test_landmark_overlay_toggle() {
        let camera = Frame::new(40, 30, colors::BLACK);
        let hands = vec![Hand::with_fingertip(Landmark::new(0.5, 0.5))];

        let mut with = FrameComposer::new(true);
        with.update_camera(&camera, &hands);
        assert_eq!(with.panel().get(200, 300), Some(colors::LANDMARK_DOT));

        let mut without = FrameComposer::new(false);
        without.update_camera(&camera, &hands);
        assert_eq!(without.panel().get(200, 300), Some(colors::BLACK));
    }
}
