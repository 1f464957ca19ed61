use crate::state::round_to;

/// Reasons a [`SchedulerConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("time_dilation must be in (0, 1], got {0}")]
    TimeDilationOutOfRange(f64),

    #[error("step_precision must be at most {max}, got {got}")]
    PrecisionTooHigh { got: u32, max: u32 },

    #[error("time_dilation {time_dilation} needs more than {step_precision} decimals")]
    StepTooFine {
        time_dilation: f64,
        step_precision: u32,
    },

    #[error("time_dilation {0} does not divide a turn into whole sub-ticks")]
    UnevenStep(f64),

    #[error("max_chained_turns must be positive")]
    ZeroChainBound,
}

/// Scheduler constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Size of one sub-tick as a fraction of a turn.
    pub time_dilation: f64,
    /// Decimal places the sub-tick counter and clock are rounded to.
    pub step_precision: u32,
    /// Most turns a single [`crate::Scheduler::advance`] call runs while the
    /// player still owes time; the next call picks the chain up again.
    pub max_chained_turns: usize,
}

impl SchedulerConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIME_DILATION: f64 = 0.1;
    pub const DEFAULT_STEP_PRECISION: u32 = 4;
    pub const DEFAULT_MAX_CHAINED_TURNS: usize = 64;

    pub fn new() -> Self {
        Self {
            time_dilation: Self::DEFAULT_TIME_DILATION,
            step_precision: Self::DEFAULT_STEP_PRECISION,
            max_chained_turns: Self::DEFAULT_MAX_CHAINED_TURNS,
        }
    }

    pub fn with_time_dilation(time_dilation: f64) -> Self {
        Self {
            time_dilation,
            ..Self::new()
        }
    }

    /// Number of sub-ticks in a full drain, boundary sub-tick included.
    pub fn sub_ticks_per_turn(&self) -> u32 {
        (1.0 / self.time_dilation).round() as u32 + 1
    }

    pub const MAX_STEP_PRECISION: u32 = 12;

    /// Checks that the step is a usable fraction of a turn.
    ///
    /// The step must split a turn into a whole number of sub-ticks at the
    /// configured precision, otherwise the clock drifts off turn boundaries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.time_dilation;
        if !step.is_finite() || step <= 0.0 || step > 1.0 {
            return Err(ConfigError::TimeDilationOutOfRange(step));
        }
        if self.step_precision > Self::MAX_STEP_PRECISION {
            return Err(ConfigError::PrecisionTooHigh {
                got: self.step_precision,
                max: Self::MAX_STEP_PRECISION,
            });
        }
        if round_to(step, self.step_precision) != step {
            return Err(ConfigError::StepTooFine {
                time_dilation: step,
                step_precision: self.step_precision,
            });
        }
        let sub_ticks = (1.0 / step).round();
        if round_to(sub_ticks * step, self.step_precision) != 1.0 {
            return Err(ConfigError::UnevenStep(step));
        }
        if self.max_chained_turns == 0 {
            return Err(ConfigError::ZeroChainBound);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
