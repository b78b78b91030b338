// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motor Sequencing
//!
//! This module turns operating modes into coil energization patterns, one pattern per step tick.
//!
//! ## Modules
//!
//! - [`coil`] - Half-step coil pattern table and index lookup.
//! - [`state_machine`] - Operating modes and the per-tick stepping policy.

pub mod coil;
pub mod state_machine;

pub use coil::{pattern, CoilPattern, COIL_SEQUENCE};
pub use state_machine::{MotorMode, MotorStateMachine};

/// Output stage that energizes the four motor windings.
pub trait CoilDriver {
    /// Drive all four windings to `pattern` in a single write.
    fn energize(&mut self, pattern: CoilPattern);
}
