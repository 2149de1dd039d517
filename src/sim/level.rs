//! Level progression
//!
//! Builds the brick grid for each level and moves the run between levels, the
//! menu and a win.

use super::grid::BrickGrid;
use super::state::{GameEvent, GamePhase, GameState};

/// Result of finishing a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// Next level is set up and playing
    Next(u32),
    /// Last level cleared, run is over
    Won,
}

/// Begin a brand-new run from the menu
pub fn start_run(state: &mut GameState) {
    state.score = 0;
    state.level = 1;
    state.last_escalation = None;
    start_level(state);
    log::info!("Run started");
}

/// Fresh grid plus start positions for the current level
pub fn start_level(state: &mut GameState) {
    state.grid = BrickGrid::for_level(state.level);
    state.reset_ball_and_paddle();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!(
        "Level {} ({} rows, ball speed {:.1})",
        state.level,
        state.grid.rows(),
        state.ball.vel.x.abs()
    );
}

/// Move past a cleared level
pub fn advance_level(state: &mut GameState) -> LevelOutcome {
    state.level += 1;
    if state.level <= state.tuning.max_level {
        start_level(state);
        LevelOutcome::Next(state.level)
    } else {
        log::info!("All {} levels cleared, score {}", state.tuning.max_level, state.score);
        state.events.push(GameEvent::RunWon { score: state.score });
        return_to_menu(state);
        LevelOutcome::Won
    }
}

/// Leave play; the menu is always entered at level 1
pub fn return_to_menu(state: &mut GameState) {
    state.phase = GamePhase::Menu;
    state.level = 1;
    state.grid = BrickGrid::for_level(1);
    state.reset_ball_and_paddle();
}

/// Settle a terminal phase left behind by `tick`
///
/// Returns the level outcome when a level was cleared.
pub fn resolve_phase(state: &mut GameState) -> Option<LevelOutcome> {
    match state.phase {
        GamePhase::LevelCleared => Some(advance_level(state)),
        GamePhase::GameOver => {
            log::info!("Ball lost on level {}, score {}", state.level, state.score);
            return_to_menu(state);
            None
        }
        GamePhase::Menu | GamePhase::Playing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::default();
        start_run(&mut state);
        state
    }

    #[test]
    fn test_start_run_resets_score_and_level() {
        let mut state = GameState::default();
        state.score = 99;
        state.level = 4;
        state.last_escalation = Some(90);
        start_run(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.last_escalation, None);
        assert_eq!(state.grid.rows(), 3);
    }

    #[test]
    fn test_advance_builds_bigger_grid() {
        let mut state = playing_state();
        state.score = 150;
        assert_eq!(advance_level(&mut state), LevelOutcome::Next(2));
        assert_eq!(state.level, 2);
        assert_eq!(state.grid.rows(), 4);
        assert_eq!(state.grid.columns(), 10);
        assert_eq!(state.grid.remaining(), 40);
        assert_eq!(state.phase, GamePhase::Playing);
        // Score carries across levels
        assert_eq!(state.score, 150);
    }

    #[test]
    fn test_level_advance_speeds_up_the_ball() {
        let mut state = playing_state();
        let before = state.ball.vel.length();
        advance_level(&mut state);
        assert!(state.ball.vel.length() > before);
        assert_eq!(state.ball.vel.x, 4.5);
        assert_eq!(state.ball.vel.y, -4.5);
    }

    #[test]
    fn test_clearing_last_level_wins() {
        let mut state = GameState::new(Tuning {
            max_level: 2,
            ..Default::default()
        });
        start_run(&mut state);
        assert_eq!(advance_level(&mut state), LevelOutcome::Next(2));
        state.drain_events();
        assert_eq!(advance_level(&mut state), LevelOutcome::Won);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.level, 1);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::RunWon { .. })));
    }

    #[test]
    fn test_game_over_resolves_to_menu() {
        let mut state = playing_state();
        advance_level(&mut state);
        state.score = 42;
        state.phase = GamePhase::GameOver;
        assert_eq!(resolve_phase(&mut state), None);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.level, 1);
        // Score stays visible until the next run starts
        assert_eq!(state.score, 42);
    }

    #[test]
    fn test_resolve_leaves_playing_alone() {
        let mut state = playing_state();
        assert_eq!(resolve_phase(&mut state), None);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
