//! Game modes and their per-level rules
//!
//! Every rule is a pure function of the level number so a level can be
//! rebuilt identically at any time.

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_SIZE;

/// Playable modes, in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Classic,
    Moving,
    Windy,
    Obstacles,
    Precision,
    Timed,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Classic,
        GameMode::Moving,
        GameMode::Windy,
        GameMode::Obstacles,
        GameMode::Precision,
        GameMode::Timed,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Moving => "moving",
            GameMode::Windy => "windy",
            GameMode::Obstacles => "obstacles",
            GameMode::Precision => "precision",
            GameMode::Timed => "timed",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Moving => "Moving Targets",
            GameMode::Windy => "Windy Day",
            GameMode::Obstacles => "Obstacle Course",
            GameMode::Precision => "Precision Challenge",
            GameMode::Timed => "Time Attack",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameMode::Classic => "Standard archery practice",
            GameMode::Moving => "Targets that move around",
            GameMode::Windy => "Wind affects arrow flight",
            GameMode::Obstacles => "Navigate around barriers",
            GameMode::Precision => "Smaller targets, higher scores",
            GameMode::Timed => "Race against the clock",
        }
    }

    /// Level that unlocks this mode (`None` = available from the start)
    pub fn unlock_level(self) -> Option<u32> {
        match self {
            GameMode::Classic => None,
            GameMode::Moving => Some(3),
            GameMode::Windy => Some(5),
            GameMode::Obstacles => Some(7),
            GameMode::Precision => Some(10),
            GameMode::Timed => Some(12),
        }
    }

    /// Target hits needed to clear `level`
    pub fn quota(self, level: u32) -> u32 {
        match self {
            GameMode::Classic => (3 + level).min(8),
            GameMode::Moving => (4 + level / 2).min(6),
            GameMode::Windy => (3 + level).min(7),
            GameMode::Obstacles => (2 + level).min(5),
            GameMode::Precision => (2 + level / 2).min(4),
            GameMode::Timed => (5 + level).min(10),
        }
    }

    /// Level time limit in ms (0 = unlimited)
    pub fn time_limit_ms(self, level: u32) -> f64 {
        match self {
            GameMode::Timed => (60 - 2 * level.min(15)).max(30) as f64 * 1000.0,
            _ => 0.0,
        }
    }

    pub fn has_wind(self) -> bool {
        matches!(self, GameMode::Windy)
    }

    /// Wind strength for a windy level
    pub fn wind_strength(level: u32) -> f32 {
        (0.1 + level as f32 * 0.05).min(0.4)
    }

    /// Obstacles placed at level start
    pub fn obstacle_count(self, level: u32) -> u32 {
        match self {
            GameMode::Obstacles => (1 + level / 2).min(4),
            _ => 0,
        }
    }

    /// Edge length of a precision target
    pub fn precision_size(level: u32) -> f32 {
        TARGET_SIZE * (1.0 - level as f32 * 0.05).max(0.5)
    }

    /// How long a time-attack target stays up unclaimed
    pub fn target_time_limit_ms(level: u32) -> f64 {
        (8000.0 - level as f64 * 200.0).max(2000.0)
    }
}

/// Registry row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeEntry {
    pub mode: GameMode,
    pub unlocked: bool,
}

/// Unlock state of every mode
///
/// Flags only ever go from locked to unlocked.
#[derive(Debug, Clone, Serialize)]
pub struct ModeRegistry {
    entries: Vec<ModeEntry>,
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeRegistry {
    /// Classic unlocked, everything else locked
    pub fn new() -> Self {
        Self {
            entries: GameMode::ALL
                .into_iter()
                .map(|mode| ModeEntry {
                    mode,
                    unlocked: mode.unlock_level().is_none(),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ModeEntry] {
        &self.entries
    }

    pub fn is_unlocked(&self, mode: GameMode) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.mode == mode && entry.unlocked)
    }

    /// Unlock every mode whose threshold `level` has reached
    ///
    /// Returns only the modes that were locked before this call.
    pub fn unlock_through(&mut self, level: u32) -> Vec<GameMode> {
        let mut newly = Vec::new();
        for entry in &mut self.entries {
            let reached = entry.mode.unlock_level().is_some_and(|at| level >= at);
            if reached && !entry.unlocked {
                entry.unlocked = true;
                newly.push(entry.mode);
            }
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_id(mode.id()), Some(mode));
        }
        assert_eq!(GameMode::from_id(" Windy "), Some(GameMode::Windy));
        assert_eq!(GameMode::from_id("arcade"), None);
    }

    #[test]
    fn quotas_are_capped() {
        assert_eq!(GameMode::Classic.quota(1), 4);
        assert_eq!(GameMode::Classic.quota(20), 8);
        assert_eq!(GameMode::Moving.quota(1), 4);
        assert_eq!(GameMode::Moving.quota(5), 6);
        assert_eq!(GameMode::Windy.quota(9), 7);
        assert_eq!(GameMode::Obstacles.quota(1), 3);
        assert_eq!(GameMode::Obstacles.quota(4), 5);
        assert_eq!(GameMode::Precision.quota(1), 2);
        assert_eq!(GameMode::Precision.quota(10), 4);
        assert_eq!(GameMode::Timed.quota(1), 6);
        assert_eq!(GameMode::Timed.quota(30), 10);
    }

    #[test]
    fn quotas_never_zero() {
        for mode in GameMode::ALL {
            for level in 1..50 {
                assert!(mode.quota(level) > 0);
            }
        }
    }

    #[test]
    fn only_time_attack_is_limited() {
        assert_eq!(GameMode::Timed.time_limit_ms(1), 58_000.0);
        assert_eq!(GameMode::Timed.time_limit_ms(15), 30_000.0);
        assert_eq!(GameMode::Timed.time_limit_ms(100), 30_000.0);
        for mode in GameMode::ALL.into_iter().filter(|m| *m != GameMode::Timed) {
            assert_eq!(mode.time_limit_ms(3), 0.0);
        }
    }

    #[test]
    fn wind_and_obstacle_scaling() {
        assert!((GameMode::wind_strength(1) - 0.15).abs() < 1e-6);
        assert_eq!(GameMode::wind_strength(20), 0.4);
        assert_eq!(GameMode::Obstacles.obstacle_count(1), 1);
        assert_eq!(GameMode::Obstacles.obstacle_count(4), 3);
        assert_eq!(GameMode::Obstacles.obstacle_count(10), 4);
        assert_eq!(GameMode::Classic.obstacle_count(10), 0);
        assert!(GameMode::Windy.has_wind());
        assert!(!GameMode::Classic.has_wind());
    }

    #[test]
    fn precision_targets_shrink_to_half() {
        assert!((GameMode::precision_size(2) - 54.0).abs() < 1e-3);
        assert_eq!(GameMode::precision_size(40), 30.0);
    }

    #[test]
    fn registry_starts_with_classic_only() {
        let registry = ModeRegistry::new();
        assert!(registry.is_unlocked(GameMode::Classic));
        for mode in &GameMode::ALL[1..] {
            assert!(!registry.is_unlocked(*mode));
        }
    }

    #[test]
    fn unlock_is_idempotent_and_monotonic() {
        let mut registry = ModeRegistry::new();
        assert!(registry.unlock_through(2).is_empty());
        assert_eq!(registry.unlock_through(5), vec![GameMode::Moving, GameMode::Windy]);
        assert!(registry.unlock_through(5).is_empty());
        // Lower levels never re-lock anything
        assert!(registry.unlock_through(1).is_empty());
        assert!(registry.is_unlocked(GameMode::Moving));
        assert!(registry.is_unlocked(GameMode::Windy));
        assert_eq!(
            registry.unlock_through(12),
            vec![GameMode::Obstacles, GameMode::Precision, GameMode::Timed]
        );
    }
}
