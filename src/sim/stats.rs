//! Shot statistics
//!
//! Pure aggregation: counters only grow, streaks follow hits and misses.

use serde::Serialize;

use super::state::Ring;
use crate::consts::RECENT_SHOTS;

/// Result of one resolved shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ShotOutcome {
    Hit { ring: Ring },
    Miss,
}

/// Entry in the recent-shot log
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShotRecord {
    pub outcome: ShotOutcome,
    pub points: u32,
    /// Simulation time (ms)
    pub timestamp_ms: f64,
}

/// Hits per scoring ring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RingCounts {
    pub bullseye: u32,
    pub inner: u32,
    pub middle: u32,
    pub outer: u32,
}

impl RingCounts {
    pub fn get(&self, ring: Ring) -> u32 {
        match ring {
            Ring::Bullseye => self.bullseye,
            Ring::Inner => self.inner,
            Ring::Middle => self.middle,
            Ring::Outer => self.outer,
        }
    }

    fn increment(&mut self, ring: Ring) {
        let slot = match ring {
            Ring::Bullseye => &mut self.bullseye,
            Ring::Inner => &mut self.inner,
            Ring::Middle => &mut self.middle,
            Ring::Outer => &mut self.outer,
        };
        *slot += 1;
    }
}

/// Cumulative statistics for the session
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameStats {
    pub total_score: u64,
    pub arrows_shot: u32,
    pub targets_hit: u32,
    pub ring_hits: RingCounts,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Newest first, at most [`RECENT_SHOTS`]
    pub recent_shots: Vec<ShotRecord>,
}

impl GameStats {
    /// Count an arrow leaving the bow
    pub fn record_shot(&mut self) {
        self.arrows_shot += 1;
    }

    /// Count a target hit, returns the points awarded
    pub fn record_hit(&mut self, ring: Ring, now_ms: f64) -> u32 {
        let points = ring.points();
        self.total_score += points as u64;
        self.targets_hit += 1;
        self.ring_hits.increment(ring);
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        self.push_recent(ShotRecord {
            outcome: ShotOutcome::Hit { ring },
            points,
            timestamp_ms: now_ms,
        });
        points
    }

    /// Count an arrow that came to rest without scoring
    pub fn record_miss(&mut self, now_ms: f64) {
        self.current_streak = 0;
        self.push_recent(ShotRecord {
            outcome: ShotOutcome::Miss,
            points: 0,
            timestamp_ms: now_ms,
        });
    }

    /// Hit percentage, rounded (0 before the first shot)
    pub fn accuracy(&self) -> u32 {
        if self.arrows_shot == 0 {
            return 0;
        }
        (self.targets_hit as f64 / self.arrows_shot as f64 * 100.0).round() as u32
    }

    /// Points earned from one ring
    pub fn ring_points(&self, ring: Ring) -> u64 {
        self.ring_hits.get(ring) as u64 * ring.points() as u64
    }

    fn push_recent(&mut self, shot: ShotRecord) {
        self.recent_shots.insert(0, shot);
        self.recent_shots.truncate(RECENT_SHOTS);
    }
}
