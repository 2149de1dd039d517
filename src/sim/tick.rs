//! Per-frame simulation step
//!
//! One call advances the ball by one explicit Euler step and resolves every
//! collision for that frame. Rendering never happens here.

use super::collision::{ball_lost, ball_paddle_overlap, bounce_off_walls, first_brick_hit};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Nominal step length: one rendered frame
pub const FRAME_DT: f32 = 1.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New paddle left edge from the hand tracker (None keeps the old one)
    pub paddle_x: Option<f32>,
}

/// Advance the game state by `dt` nominal frames
///
/// Only acts while `Playing`. Leaves the phase at `LevelCleared` or `GameOver`
/// when the frame ends the level; `level::resolve_phase` takes it from there.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if let Some(x) = input.paddle_x {
        let clamp = state.tuning.clamp_paddle;
        state.paddle.move_to(x, clamp);
    }

    // Move
    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;

    // Walls
    let contact = bounce_off_walls(&mut ball.pos, &mut ball.vel, ball.radius, PLAYFIELD_WIDTH);
    if contact.any() {
        state.events.push(GameEvent::WallBounce);
    }

    // Paddle (only while falling, so a deep overlap can't bounce twice)
    let paddle_rect = state.paddle.rect();
    if state.ball.vel.y > 0.0 && ball_paddle_overlap(state.ball.pos, state.ball.radius, &paddle_rect)
    {
        state.ball.vel.y = -state.ball.vel.y;
        state.add_score(state.tuning.paddle_hit_score);
        state.events.push(GameEvent::PaddleHit);
    }

    // Bricks: at most one per frame, first in row-major order
    if let Some((row, col)) = first_brick_hit(&state.grid, state.ball.pos, state.ball.radius) {
        state.grid.clear(row, col);
        state.ball.vel.y = -state.ball.vel.y;
        state.add_score(state.tuning.brick_hit_score);
        state.events.push(GameEvent::BrickDestroyed { row, col });
    }

    apply_score_escalation(state);

    // Clearance is checked before the fall, matching the level-first priority
    if state.grid.is_cleared() {
        state.phase = GamePhase::LevelCleared;
        state.events.push(GameEvent::LevelCleared { level: state.level });
    } else if ball_lost(state.ball.pos, PLAYFIELD_HEIGHT) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::BallLost { level: state.level });
    }
}

/// Speed the ball up once for each distinct score multiple reached
fn apply_score_escalation(state: &mut GameState) {
    let score = state.score;
    if !state.tuning.is_escalation_score(score) || state.last_escalation == Some(score) {
        return;
    }
    state.ball.escalate(state.tuning.speed_increment);
    state.last_escalation = Some(score);
    state.events.push(GameEvent::SpeedUp { score });
    log::debug!("Ball sped up at score {}", score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{resolve_phase, start_run};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::default();
        start_run(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_ignored_outside_play() {
        let mut state = GameState::default();
        let before = state.ball.pos;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ball_moves_one_step() {
        let mut state = playing();
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.ball.pos, Vec2::new(404.0, 296.0));
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.ball.pos, Vec2::new(406.0, 294.0));
    }

    #[test]
    fn test_paddle_follows_input_and_holds_without_hand() {
        let mut state = playing();
        tick(
            &mut state,
            &TickInput {
                paddle_x: Some(120.0),
            },
            FRAME_DT,
        );
        assert_eq!(state.paddle.x, 120.0);
        // No hand this frame: paddle stays put
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.paddle.x, 120.0);
    }

    #[test]
    fn test_paddle_input_is_clamped() {
        let mut state = playing();
        tick(
            &mut state,
            &TickInput {
                paddle_x: Some(790.0),
            },
            FRAME_DT,
        );
        assert_eq!(state.paddle.x, 650.0);
    }

    #[test]
    fn test_paddle_hit_scores_one() {
        let mut state = playing();
        state.ball.pos = Vec2::new(400.0, 560.0);
        state.ball.vel = Vec2::new(4.0, 4.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert!(state.events.contains(&GameEvent::PaddleHit));

        // Still overlapping but now rising: no second hit
        state.ball.pos = Vec2::new(400.0, 568.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, -4.0);
    }

    #[test]
    fn test_brick_hit_scores_five_and_stays_cleared() {
        let mut state = playing();
        state.ball.pos = Vec2::new(100.0, 38.0);
        state.ball.vel = Vec2::new(4.0, -4.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.score, 5);
        assert!(!state.grid.is_present(0, 1));
        assert_eq!(state.ball.vel.y, 4.0);
        assert!(state.events.contains(&GameEvent::BrickDestroyed { row: 0, col: 1 }));

        // Run the level on for a while: the cell never comes back
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), FRAME_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
            assert!(!state.grid.is_present(0, 1));
        }
    }

    #[test]
    fn test_escalation_once_per_multiple() {
        let mut state = playing();
        state.ball.pos = Vec2::new(400.0, 300.0);
        let mut last_speed = state.ball.vel.length();

        for target in [10u64, 20, 30, 40] {
            state.score = target;
            tick(&mut state, &TickInput::default(), FRAME_DT);
            let speed = state.ball.vel.length();
            assert!(speed > last_speed, "speed should grow at score {}", target);
            last_speed = speed;

            // Holding the same score doesn't escalate again
            tick(&mut state, &TickInput::default(), FRAME_DT);
            assert_eq!(state.ball.vel.length(), last_speed);
            state.ball.pos = Vec2::new(400.0, 300.0);
        }
    }

    #[test]
    fn test_no_escalation_at_zero_or_off_multiples() {
        let mut state = playing();
        let speed = state.ball.vel.length();
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.ball.vel.length(), speed);
        state.score = 15;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.ball.vel.length(), speed);
    }

    #[test]
    fn test_ball_below_playfield_returns_to_menu() {
        let mut state = playing();
        crate::sim::level::advance_level(&mut state);
        state.ball.pos = Vec2::new(400.0, 597.0);
        state.ball.vel = Vec2::new(4.0, 4.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.ball.pos.y, 601.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        resolve_phase(&mut state);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_last_brick_advances_level() {
        let mut state = playing();
        let cells: Vec<_> = state.grid.present_cells().collect();
        for (row, col) in cells {
            if (row, col) != (0, 1) {
                state.grid.clear(row, col);
            }
        }
        state.ball.pos = Vec2::new(100.0, 38.0);
        state.ball.vel = Vec2::new(4.0, -4.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::LevelCleared);

        resolve_phase(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.grid.rows(), 4);
        assert_eq!(state.grid.columns(), 10);
        assert_eq!(state.grid.remaining(), 40);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_cleared_level_wins_over_lost_ball() {
        let mut state = playing();
        let cells: Vec<_> = state.grid.present_cells().collect();
        for (row, col) in cells {
            state.grid.clear(row, col);
        }
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(700.0, 597.0);
        state.ball.vel = Vec2::new(4.0, 4.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert!(ball_lost(state.ball.pos, PLAYFIELD_HEIGHT));
        assert_eq!(state.phase, GamePhase::LevelCleared);
        assert!(
            state
                .drain_events()
                .iter()
                .all(|e| !matches!(e, GameEvent::BallLost { .. }))
        );
    }

    #[test]
    fn test_score_never_decreases() {
        let mut state = playing();
        let mut last = state.score;
        for i in 0..2000 {
            // Sweep the paddle so it catches the ball now and then
            let x = ((i * 7) % 650) as f32;
            tick(&mut state, &TickInput { paddle_x: Some(x) }, FRAME_DT);
            assert!(state.score >= last);
            last = state.score;
            if state.phase != GamePhase::Playing {
                break;
            }
        }
    }
}
