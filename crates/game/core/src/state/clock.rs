use super::common::round_to;

/// Global simulation clock advanced in fixed sub-tick steps.
///
/// `current_time` grows by one step per drained sub-tick and the turn index is
/// its floor. A full drain runs one sub-tick past the turn boundary, so every
/// turn begins by rewinding one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnClock {
    current_time: f64,
    turn_origin: f64,
}

impl TurnClock {
    pub const fn new() -> Self {
        Self {
            current_time: 0.0,
            turn_origin: 0.0,
        }
    }

    /// Creates a clock already positioned at `time`.
    pub fn starting_at(time: f64) -> Self {
        Self {
            current_time: time,
            turn_origin: time,
        }
    }

    /// Current clock value in turns.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Index of the turn the clock is currently in.
    pub fn current_turn(&self) -> u64 {
        self.current_time.max(0.0).floor() as u64
    }

    /// Rewinds one step before a new turn starts.
    ///
    /// The clock never moves behind the point at which the previous turn began,
    /// so turns that end on their first sub-tick do not walk time backwards.
    pub fn begin_turn(&mut self, step: f64, precision: u32) {
        let rewound = round_to(self.current_time - step, precision);
        self.current_time = rewound.max(self.turn_origin);
        self.turn_origin = self.current_time;
    }

    /// Advances the clock by one sub-tick.
    pub fn advance(&mut self, step: f64, precision: u32) {
        self.current_time = round_to(self.current_time + step, precision);
    }
}
