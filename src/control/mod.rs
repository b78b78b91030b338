// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides the closed-loop and rate-control pieces used by the motor state machine and
//! the command dispatcher.
//!
//! ## Modules
//!
//! - [`follow`] - Potentiometer follow tracking with a step deadband.
//! - [`speed`] - RPM to step-timer period conversion and retiming.

pub mod follow;
pub mod speed;

pub use follow::{FollowSession, PositionSensor, PositionTracker, Step};
pub use speed::{ReloadTimer, SpeedController};
