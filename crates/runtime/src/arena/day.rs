use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use turn_core::DayCycle;

/// Coarse time of day derived from elapsed turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DayPhase {
    Dawn,
    Day,
    Dusk,
    Night,
}

/// Day/night cycle fed by the scheduler after every completed drain.
///
/// Cloning yields another handle onto the same cycle, so the runtime can read
/// the phase while the scheduler owns the sink.
#[derive(Clone, Debug)]
pub struct DayNight {
    elapsed_bits: Arc<AtomicU64>,
    day_length: f64,
}

impl DayNight {
    pub const DEFAULT_DAY_LENGTH: f64 = 24.0;

    pub fn new(day_length: f64) -> Self {
        Self {
            elapsed_bits: Arc::new(AtomicU64::new(0f64.to_bits())),
            day_length: day_length.max(f64::EPSILON),
        }
    }

    /// Total progress received, in turns.
    pub fn elapsed(&self) -> f64 {
        f64::from_bits(self.elapsed_bits.load(Ordering::Relaxed))
    }

    /// Position within the current day in `[0, 1)`.
    pub fn time_of_day(&self) -> f64 {
        (self.elapsed() % self.day_length) / self.day_length
    }

    pub fn phase(&self) -> DayPhase {
        match self.time_of_day() {
            t if t < 0.25 => DayPhase::Dawn,
            t if t < 0.5 => DayPhase::Day,
            t if t < 0.75 => DayPhase::Dusk,
            _ => DayPhase::Night,
        }
    }
}

impl Default for DayNight {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DAY_LENGTH)
    }
}

impl DayCycle for DayNight {
    fn advance(&mut self, progress: f64) {
        let elapsed = self.elapsed() + progress;
        self.elapsed_bits.store(elapsed.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_progress() {
        let day = DayNight::new(4.0);
        let mut sink = day.clone();

        sink.advance(1.0);
        sink.advance(1.0);

        assert_eq!(day.elapsed(), 2.0);
        assert_eq!(day.phase(), DayPhase::Dusk);
    }

    #[test]
    fn wraps_around_after_a_full_day() {
        let mut day = DayNight::new(4.0);
        day.advance(4.5);
        assert_eq!(day.phase(), DayPhase::Dawn);
    }
}
