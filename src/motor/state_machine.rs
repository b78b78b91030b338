// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-tick motor state machine.
//!
//! The step-tick interrupt calls [`MotorStateMachine::tick`] once per period with the mode it just
//! read from shared state. Each call yields exactly one pattern to write to the coils, even when it
//! equals the previous one.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let pattern = machine.tick_shared(&SHARED, &mut pot);
//! coils.energize(pattern);
//! ```

use crate::config::MotorConfig;
use crate::control::{FollowSession, PositionSensor, PositionTracker, Step};
use crate::motor::coil::{pattern, CoilPattern};
use crate::shared::SharedState;

/// Operating mode of the motor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorMode {
    /// Windings de-energized.
    #[default]
    Off,
    Clockwise,
    CounterClockwise,
    /// Track the potentiometer relative to where it was on entry.
    Follow,
}

impl MotorMode {
    /// Mode selected by the next mode-advance command.
    pub const fn next(self) -> Self {
        match self {
            MotorMode::Off => MotorMode::CounterClockwise,
            MotorMode::CounterClockwise => MotorMode::Clockwise,
            MotorMode::Clockwise => MotorMode::Follow,
            MotorMode::Follow => MotorMode::Off,
        }
    }

    /// Encoding used for atomic storage.
    pub const fn to_raw(self) -> u8 {
        match self {
            MotorMode::Off => 0,
            MotorMode::CounterClockwise => 1,
            MotorMode::Clockwise => 2,
            MotorMode::Follow => 3,
        }
    }

    /// Decode a stored mode. Anything unrecognised is [`MotorMode::Off`].
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => MotorMode::CounterClockwise,
            2 => MotorMode::Clockwise,
            3 => MotorMode::Follow,
            _ => MotorMode::Off,
        }
    }

    /// True for every mode that may hold the windings energized.
    #[inline]
    pub const fn is_energized(self) -> bool {
        !matches!(self, MotorMode::Off)
    }
}

/// Step index, follow tracker, and last output. Owned by the step-tick context.
#[derive(Debug)]
pub struct MotorStateMachine {
    step_index: i32,
    tracker: PositionTracker,
    /// Mode seen on the previous tick
    mode: MotorMode,
    /// Shared-state generation seen on the previous tick
    generation: Option<u32>,
    output: CoilPattern,
}

impl MotorStateMachine {
    pub fn new(config: &MotorConfig) -> Self {
        Self {
            step_index: 0,
            tracker: PositionTracker::new(config),
            mode: MotorMode::Off,
            generation: None,
            output: CoilPattern::OFF,
        }
    }

    #[inline]
    pub fn step_index(&self) -> i32 {
        self.step_index
    }

    /// Pattern produced by the most recent tick.
    #[inline]
    pub fn output(&self) -> CoilPattern {
        self.output
    }

    /// Mode handled by the most recent tick.
    #[inline]
    pub fn mode(&self) -> MotorMode {
        self.mode
    }

    /// Active follow session, if the tracker has calibrated.
    #[inline]
    pub fn follow_session(&self) -> Option<&FollowSession> {
        self.tracker.session()
    }

    /// Run one step tick in `mode` and return the pattern to write.
    ///
    /// `sensor` is only sampled in [`MotorMode::Follow`], once per tick.
    pub fn tick<S: PositionSensor>(&mut self, mode: MotorMode, sensor: &mut S) -> CoilPattern {
        if mode != self.mode {
            // Any entry into follow starts a fresh session.
            self.tracker.reset();
            self.mode = mode;
        }

        self.output = match mode {
            MotorMode::Off => CoilPattern::OFF,
            MotorMode::Clockwise => self.advance(1),
            MotorMode::CounterClockwise => self.advance(-1),
            MotorMode::Follow => match self.tracker.update(sensor.sample()) {
                Step::Forward => self.advance(1),
                Step::Backward => self.advance(-1),
                Step::Hold => self.output,
            },
        };

        self.output
    }

    /// Run one step tick with the mode currently published in `shared`.
    ///
    /// Any mode write since the previous tick counts as a transition, so leaving and re-entering
    /// follow between two ticks still recalibrates.
    pub fn tick_shared<S: PositionSensor>(
        &mut self,
        shared: &SharedState,
        sensor: &mut S,
    ) -> CoilPattern {
        let snapshot = shared.mode_snapshot();
        if self.generation != Some(snapshot.generation) {
            self.generation = Some(snapshot.generation);
            self.tracker.reset();
        }
        self.tick(snapshot.mode, sensor)
    }

    fn advance(&mut self, delta: i32) -> CoilPattern {
        self.step_index = self.step_index.wrapping_add(delta);
        pattern(self.step_index)
    }
}
