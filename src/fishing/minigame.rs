//! Timed catch gauge: a cursor sweeps 0..1 while the fish drifts.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// How far the fish starts from either end of the gauge.
const FISH_START_MARGIN: f32 = 0.2;

#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct FishingMinigame {
    pub elapsed: f32,
    pub cursor: f32,
    /// +1.0 sweeping up, -1.0 sweeping down.
    pub cursor_dir: f32,
    pub fish: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishingResult {
    Caught,
    Missed,
    TimedOut,
    Cancelled,
}

impl FishingResult {
    pub fn notice(self) -> &'static str {
        match self {
            FishingResult::Caught => "Caught a fish!",
            FishingResult::Missed | FishingResult::TimedOut => "Fish escaped",
            FishingResult::Cancelled => "Reeled in",
        }
    }
}

impl FishingMinigame {
    pub fn start(rng: &mut impl Rng) -> Self {
        Self {
            elapsed: 0.0,
            cursor: 0.0,
            cursor_dir: 1.0,
            fish: rng.gen_range(FISH_START_MARGIN..1.0 - FISH_START_MARGIN),
        }
    }

    /// Advances the gauge by `dt` seconds.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, config: &GameConfig) {
        self.elapsed += dt;

        self.cursor += self.cursor_dir * config.fishing_cursor_speed * dt;
        if self.cursor >= 1.0 {
            self.cursor = 1.0;
            self.cursor_dir = -1.0;
        } else if self.cursor <= 0.0 {
            self.cursor = 0.0;
            self.cursor_dir = 1.0;
        }

        let wander: f32 = rng.gen_range(-1.0..=1.0);
        self.fish = (self.fish + wander * config.fishing_fish_drift * dt).clamp(0.0, 1.0);
    }

    pub fn remaining(&self, duration: f32) -> f32 {
        (duration - self.elapsed).max(0.0)
    }

    pub fn timed_out(&self, duration: f32) -> bool {
        self.elapsed >= duration
    }

    pub fn attempt_catch(&self, tolerance: f32) -> bool {
        (self.cursor - self.fish).abs() <= tolerance
    }
}

/// Catch window, widened once the fishing bonus is unlocked.
pub fn catch_tolerance(config: &GameConfig, progression: &Progression) -> f32 {
    if progression.has(Flag::FishingBonus) {
        config.fishing_tolerance + config.fishing_bonus_tolerance
    } else {
        config.fishing_tolerance
    }
}

/// Decides this frame's result, if the minigame ends now. Cancel wins
/// over a catch attempt, which wins over the timeout.
pub fn resolve(
    game: &FishingMinigame,
    input: &PlayerInput,
    tolerance: f32,
    duration: f32,
) -> Option<FishingResult> {
    if input.ui_cancel {
        Some(FishingResult::Cancelled)
    } else if input.use_selected {
        Some(if game.attempt_catch(tolerance) {
            FishingResult::Caught
        } else {
            FishingResult::Missed
        })
    } else if game.timed_out(duration) {
        Some(FishingResult::TimedOut)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(cursor: f32, fish: f32) -> FishingMinigame {
        FishingMinigame {
            cursor,
            fish,
            cursor_dir: 1.0,
            elapsed: 0.0,
        }
    }

    #[test]
    fn test_start_keeps_fish_off_the_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let g = FishingMinigame::start(&mut rng);
            assert!((0.2..0.8).contains(&g.fish));
            assert_eq!(g.cursor, 0.0);
        }
    }

    #[test]
    fn test_catch_window() {
        assert!(game(0.5, 0.5).attempt_catch(0.08));
        assert!(game(0.55, 0.5).attempt_catch(0.08));
        assert!(!game(0.7, 0.5).attempt_catch(0.08));
    }

    #[test]
    fn test_cursor_bounces() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = game(0.9, 0.5);
        g.update(0.5, &mut rng, &config);
        assert_eq!(g.cursor, 1.0);
        assert_eq!(g.cursor_dir, -1.0);
        g.update(0.5, &mut rng, &config);
        assert!((g.cursor - 0.75).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&g.fish));
    }

    #[test]
    fn test_timeout_without_attempt() {
        let config = GameConfig::default();
        let mut g = game(0.0, 0.5);
        g.elapsed = config.fishing_duration;
        let idle = PlayerInput::default();
        assert_eq!(
            resolve(&g, &idle, 0.08, config.fishing_duration),
            Some(FishingResult::TimedOut)
        );
        g.elapsed = 1.0;
        assert_eq!(resolve(&g, &idle, 0.08, config.fishing_duration), None);
    }

    #[test]
    fn test_bonus_widens_tolerance() {
        let config = GameConfig::default();
        let mut progression = Progression::default();
        let narrow = catch_tolerance(&config, &progression);
        progression.flags.insert(Flag::FishingBonus);
        let wide = catch_tolerance(&config, &progression);
        assert!((wide - narrow - 0.10).abs() < 1e-6);
        // 0.15 apart: a miss normally, a catch with the bonus.
        let input = PlayerInput {
            use_selected: true,
            ..PlayerInput::default()
        };
        let g = game(0.65, 0.5);
        assert_eq!(resolve(&g, &input, narrow, 4.0), Some(FishingResult::Missed));
        assert_eq!(resolve(&g, &input, wide, 4.0), Some(FishingResult::Caught));
    }
}
