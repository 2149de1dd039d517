//! Data-driven game balance
//!
//! Everything the simulation needs to know about scoring and speed lives here so
//! tests can build a `GameState` with custom rules.

use serde::{Deserialize, Serialize};

/// Balance knobs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Last playable level; clearing it wins the run
    pub max_level: u32,
    /// Per-component speed at level 1 (pixels per frame)
    pub base_ball_speed: f32,
    /// Added to each velocity component's magnitude on escalation
    pub speed_increment: f32,
    /// Score multiple that triggers an escalation
    pub speed_score_threshold: u64,
    /// Points for bouncing off the paddle
    pub paddle_hit_score: u64,
    /// Points for destroying a brick
    pub brick_hit_score: u64,
    /// Keep the paddle inside the playfield
    pub clamp_paddle: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_level: 5,
            base_ball_speed: 4.0,
            speed_increment: 0.5,
            speed_score_threshold: 10,
            paddle_hit_score: 1,
            brick_hit_score: 5,
            clamp_paddle: true,
        }
    }
}

impl Tuning {
    /// Per-component speed magnitude at the start of `level`
    pub fn level_start_speed(&self, level: u32) -> f32 {
        self.base_ball_speed + level.saturating_sub(1) as f32 * self.speed_increment
    }

    /// Whether `score` is a value that escalates ball speed
    pub fn is_escalation_score(&self, score: u64) -> bool {
        self.speed_score_threshold > 0 && score > 0 && score % self.speed_score_threshold == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_uses_base_speed() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_start_speed(1), 4.0);
        assert_eq!(tuning.level_start_speed(3), 5.0);
    }

    #[test]
    fn escalation_scores_are_positive_multiples() {
        let tuning = Tuning::default();
        assert!(!tuning.is_escalation_score(0));
        assert!(!tuning.is_escalation_score(15));
        assert!(tuning.is_escalation_score(10));
        assert!(tuning.is_escalation_score(40));
    }
}
