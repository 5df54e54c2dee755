//! Sweep pattern state machine
//!
//! One cycle runs through the phases in order:
//!
//! 1. `Ascend` from `pulse_min` in `step` increments while below `pulse_max`
//! 2. `Descend` from `pulse_max` in `step` decrements while above `pulse_min`
//! 3. Four checkpoints: min, mid, max, mid, each held for `hold_ms`
//!
//! then starts over. Neither sweep lands on the far endpoint; the checkpoints
//! visit both limits explicitly.

use core::fmt;

use crate::config::{
    CHECKPOINT_HOLD_MS, PULSE_MAX, PULSE_MID, PULSE_MIN, SWEEP_STEP, SWEEP_STEP_DELAY_MS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ascend,
    Descend,
    CheckpointMin,
    CheckpointMid1,
    CheckpointMax,
    CheckpointMid2,
}

impl Phase {
    pub const fn next(self) -> Self {
        match self {
            Phase::Ascend => Phase::Descend,
            Phase::Descend => Phase::CheckpointMin,
            Phase::CheckpointMin => Phase::CheckpointMid1,
            Phase::CheckpointMid1 => Phase::CheckpointMax,
            Phase::CheckpointMax => Phase::CheckpointMid2,
            Phase::CheckpointMid2 => Phase::Ascend,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Ascend => "ascend",
            Phase::Descend => "descend",
            Phase::CheckpointMin => "checkpoint min",
            Phase::CheckpointMid1 => "checkpoint mid",
            Phase::CheckpointMax => "checkpoint max",
            Phase::CheckpointMid2 => "checkpoint mid (return)",
        }
    }

    pub const fn is_checkpoint(self) -> bool {
        !matches!(self, Phase::Ascend | Phase::Descend)
    }
}

impl ufmt::uDisplay for Phase {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}

/// One setter call followed by one wait
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub pulse: u16,
    pub hold_ms: u16,
}

impl ufmt::uDisplay for Step {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uwrite!(f, "{}: pulse={} hold={}ms", self.phase, self.pulse, self.hold_ms)
    }
}

/// Sweep limits and timing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    pub pulse_min: u16,
    pub pulse_mid: u16,
    pub pulse_max: u16,
    pub step: u16,
    pub step_delay_ms: u16,
    pub hold_ms: u16,
}

impl SweepConfig {
    /// The compiled-in pattern
    pub const DEFAULT: Self = Self {
        pulse_min: PULSE_MIN,
        pulse_mid: PULSE_MID,
        pulse_max: PULSE_MAX,
        step: SWEEP_STEP,
        step_delay_ms: SWEEP_STEP_DELAY_MS,
        hold_ms: CHECKPOINT_HOLD_MS,
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if !(self.pulse_min < self.pulse_mid && self.pulse_mid < self.pulse_max) {
            return Err(ConfigError::Unordered);
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = assert!(SweepConfig::DEFAULT.validate().is_ok());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero step would never leave the ascending phase
    ZeroStep,
    /// Limits are not `pulse_min < pulse_mid < pulse_max`
    Unordered,
}

impl ConfigError {
    const fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroStep => "sweep step must be non-zero",
            ConfigError::Unordered => "pulse limits must satisfy min < mid < max",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl ufmt::uDisplay for ConfigError {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.message())
    }
}

/// Endless generator of sweep steps
#[derive(Clone, Debug)]
pub struct SweepPattern {
    config: SweepConfig,
    phase: Phase,
    // Next value for the sweeping phases
    cursor: u16,
}

impl SweepPattern {
    pub fn new(config: SweepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    const fn from_valid(config: SweepConfig) -> Self {
        let cursor = config.pulse_min;
        Self {
            config,
            phase: Phase::Ascend,
            cursor,
        }
    }

    /// Phase the next step belongs to, as far as it is known. At the end of a
    /// sweep this is still the sweeping phase until the boundary is checked.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True before the first step and right after the last checkpoint
    pub fn at_cycle_start(&self) -> bool {
        self.phase == Phase::Ascend && self.cursor == self.config.pulse_min
    }

    pub fn next_step(&mut self) -> Step {
        loop {
            match self.phase {
                Phase::Ascend => {
                    if self.cursor < self.config.pulse_max {
                        let pulse = self.cursor;
                        // Overflow ends the sweep just like reaching the limit
                        self.cursor = pulse.checked_add(self.config.step).unwrap_or(u16::MAX);
                        return self.sweep_step(pulse);
                    }
                    self.enter(Phase::Descend);
                }
                Phase::Descend => {
                    if self.cursor > self.config.pulse_min {
                        let pulse = self.cursor;
                        self.cursor = pulse.checked_sub(self.config.step).unwrap_or(0);
                        return self.sweep_step(pulse);
                    }
                    self.enter(Phase::CheckpointMin);
                }
                checkpoint => {
                    let pulse = match checkpoint {
                        Phase::CheckpointMin => self.config.pulse_min,
                        Phase::CheckpointMax => self.config.pulse_max,
                        _ => self.config.pulse_mid,
                    };
                    self.enter(checkpoint.next());
                    return Step {
                        phase: checkpoint,
                        pulse,
                        hold_ms: self.config.hold_ms,
                    };
                }
            }
        }
    }

    fn sweep_step(&self, pulse: u16) -> Step {
        Step {
            phase: self.phase,
            pulse,
            hold_ms: self.config.step_delay_ms,
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        match phase {
            Phase::Ascend => self.cursor = self.config.pulse_min,
            Phase::Descend => self.cursor = self.config.pulse_max,
            _ => {}
        }
    }
}

impl Default for SweepPattern {
    fn default() -> Self {
        Self::from_valid(SweepConfig::DEFAULT)
    }
}

impl Iterator for SweepPattern {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        Some(self.next_step())
    }
}
