//! Score, level and gravity speed progression

use crate::config::GameConfig;

/// Scoring and difficulty state for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Current score
    pub score: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Gravity interval in milliseconds
    pub fall_interval_ms: u32,
}

impl Progress {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: config.initial_fall_interval_ms,
        }
    }

    /// Account for one lock that cleared `lines` rows.
    ///
    /// Called after every lock, including locks that clear nothing. At most
    /// one level is gained per call. Returns true on level up.
    pub fn apply_clear(&mut self, lines: usize, config: &GameConfig) -> bool {
        self.lines = self.lines.saturating_add(lines as u32);
        self.score = self
            .score
            .saturating_add((lines as u64).saturating_mul(config.score_per_line));

        let threshold = u64::from(self.level).saturating_mul(config.level_up_score_step);
        if self.score < threshold {
            return false;
        }

        self.level = self.level.saturating_add(1);
        self.fall_interval_ms = self
            .fall_interval_ms
            .saturating_sub(config.speed_decrease_per_level)
            .max(config.min_fall_interval_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let progress = Progress::new(&GameConfig::default());
        assert_eq!(progress.score, 0);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.lines, 0);
        assert_eq!(progress.fall_interval_ms, 1000);
    }

    #[test]
    fn test_score_per_line() {
        let config = GameConfig::default();
        for n in 0..=4 {
            let mut progress = Progress::new(&config);
            progress.apply_clear(n, &config);
            assert_eq!(progress.score, 100 * n as u64);
            assert_eq!(progress.lines, n as u32);
        }
    }

    #[test]
    fn test_level_up_at_threshold() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);

        assert!(!progress.apply_clear(4, &config));
        assert_eq!(progress.level, 1);

        // 400 -> 500 crosses 1 * 500
        assert!(progress.apply_clear(1, &config));
        assert_eq!(progress.level, 2);
        assert_eq!(progress.fall_interval_ms, 900);

        // 500 -> 900 stays below 2 * 500
        assert!(!progress.apply_clear(4, &config));
        assert_eq!(progress.level, 2);

        assert!(progress.apply_clear(1, &config));
        assert_eq!(progress.level, 3);
        assert_eq!(progress.fall_interval_ms, 800);
    }

    #[test]
    fn test_one_level_per_lock() {
        let config = GameConfig {
            score_per_line: 1000,
            ..GameConfig::default()
        };
        let mut progress = Progress::new(&config);
        // 4000 points would cover several thresholds, but only one level is gained
        assert!(progress.apply_clear(4, &config));
        assert_eq!(progress.level, 2);
        // The next lock, even without lines, picks up the next level
        assert!(progress.apply_clear(0, &config));
        assert_eq!(progress.level, 3);
    }

    #[test]
    fn test_fall_interval_floor() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        for _ in 0..40 {
            progress.apply_clear(4, &config);
        }
        assert!(progress.level > 10);
        assert_eq!(progress.fall_interval_ms, config.min_fall_interval_ms);
    }

    #[test]
    fn test_score_and_level_never_decrease() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        let (mut score, mut level) = (0, 1);
        for n in [0, 1, 3, 0, 4, 2, 0, 1, 4, 4] {
            progress.apply_clear(n, &config);
            assert!(progress.score >= score);
            assert!(progress.level >= level);
            score = progress.score;
            level = progress.level;
        }
    }

    #[test]
    fn test_huge_rule_values_saturate() {
        let config = GameConfig {
            score_per_line: u64::MAX,
            level_up_score_step: u64::MAX / 2 + 1,
            ..GameConfig::default()
        };
        let mut progress = Progress::new(&config);
        assert!(progress.apply_clear(1, &config));
        assert_eq!(progress.score, u64::MAX);
        // Level 2 threshold saturates at u64::MAX, which the score still meets
        assert!(progress.apply_clear(4, &config));
        assert_eq!(progress.score, u64::MAX);
        assert_eq!(progress.level, 3);
    }
}
