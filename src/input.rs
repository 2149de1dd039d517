//! Player input
//!
//! - Input mapper: fingertip pixel coordinates in camera space to playfield space
//! - `InputEvent`: pointer, keyboard and window events consumed by the menu and game loop

use glam::Vec2;

use crate::platform::Hand;

/// Discrete events delivered to the frame loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed at a window position (logical units)
    Click(Vec2),
    /// Pointer moved to a window position (logical units)
    PointerMoved(Vec2),
    /// Escape key
    Escape,
    /// Window closed / process asked to stop
    Quit,
}

/// Scale a point from a `source` sized region to a `target` sized region, per axis
///
/// Pure linear scaling: `point * target / source`. A zero-sized source axis maps to 0.
#[inline]
pub fn map_coordinates(point: Vec2, source: Vec2, target: Vec2) -> Vec2 {
    let scale = |p: f32, s: f32, t: f32| if s > 0.0 { p * t / s } else { 0.0 };
    Vec2::new(
        scale(point.x, source.x, target.x),
        scale(point.y, source.y, target.y),
    )
}

/// Index fingertip in camera pixels for the hand that drives the paddle
///
/// When several hands are tracked the last one wins.
pub fn fingertip_pixels(hands: &[Hand], frame_width: usize, frame_height: usize) -> Option<Vec2> {
    hands
        .iter()
        .rev()
        .find_map(|hand| hand.index_fingertip())
        .map(|tip| tip.to_pixels(frame_width, frame_height))
}

/// New paddle left edge for this frame, or None when no hand was seen
pub fn paddle_target(
    hands: &[Hand],
    frame_width: usize,
    frame_height: usize,
    playfield: Vec2,
) -> Option<f32> {
    let tip = fingertip_pixels(hands, frame_width, frame_height)?;
    let source = Vec2::new(frame_width as f32, frame_height as f32);
    Some(map_coordinates(tip, source, playfield).x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Landmark;
    use proptest::prelude::*;

    const PLAYFIELD: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_map_scales_each_axis() {
        let mapped = map_coordinates(
            Vec2::new(320.0, 240.0),
            Vec2::new(640.0, 480.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(mapped, Vec2::new(400.0, 300.0));

        let mapped = map_coordinates(
            Vec2::new(160.0, 480.0),
            Vec2::new(640.0, 480.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(mapped, Vec2::new(200.0, 600.0));
    }

    #[test]
    fn test_zero_source_maps_to_origin() {
        let mapped = map_coordinates(Vec2::new(5.0, 5.0), Vec2::ZERO, PLAYFIELD);
        assert_eq!(mapped, Vec2::ZERO);
    }

    #[test]
    fn test_no_hand_no_target() {
        assert_eq!(paddle_target(&[], 640, 480, PLAYFIELD), None);
    }

    #[test]
    fn test_last_hand_wins() {
        let hands = vec![
            Hand::with_fingertip(Landmark::new(0.1, 0.5)),
            Hand::with_fingertip(Landmark::new(0.75, 0.5)),
        ];
        assert_eq!(paddle_target(&hands, 640, 480, PLAYFIELD), Some(600.0));
    }

    #[test]
    fn test_short_hand_is_skipped() {
        let hands = vec![
            Hand::with_fingertip(Landmark::new(0.5, 0.5)),
            Hand::new(vec![Landmark::new(0.9, 0.9); 3]),
        ];
        assert_eq!(paddle_target(&hands, 640, 480, PLAYFIELD), Some(400.0));
    }

    proptest! {
        #[test]
        fn mapping_is_pure(
            x in 0.0f32..1920.0,
            y in 0.0f32..1080.0,
            sw in 1.0f32..1920.0,
            sh in 1.0f32..1080.0,
        ) {
            let a = map_coordinates(Vec2::new(x, y), Vec2::new(sw, sh), PLAYFIELD);
            let b = map_coordinates(Vec2::new(x, y), Vec2::new(sw, sh), PLAYFIELD);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn normalized_fingertip_lands_in_playfield(tx in 0.0f32..=1.0, ty in 0.0f32..=1.0) {
            let hands = vec![Hand::with_fingertip(Landmark::new(tx, ty))];
            let x = paddle_target(&hands, 640, 480, PLAYFIELD).unwrap();
            prop_assert!((0.0..=800.0 + 1e-3).contains(&x));
        }
    }
}
