// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # StepDrive Firmware
//!
//! This crate drives a 4-phase unipolar stepper motor from a fixed-rate timer interrupt. The motor
//! spins clockwise, counter-clockwise, or follows a potentiometer, selected by single-character
//! commands on the debug UART. The board firmware targets an STM32F767 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`motor`] | Coil sequence table and the per-tick motor state machine |
//! | [`control`] | Potentiometer follow tracking and step-rate (RPM) control |
//! | [`protocol`] | Single-character commands, the pending-command slot and the dispatcher |
//! | [`shared`] | State shared between the main loop and the interrupt handlers |
//! | [`config`] | Motor and timing configuration |
//! | [`heartbeat`] | Status LED duty cycle |
//! | `hw` | MCU-level wrappers for GPIO, ADC, timers and USART (`board` feature only) |
//!
//! Everything outside `hw` is plain synchronous code with no hardware access, so it builds and
//! tests on the host.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod heartbeat;
pub mod motor;
pub mod protocol;
pub mod shared;

#[cfg(feature = "board")]
pub mod hw;

pub use config::{ConfigError, MotorConfig};
pub use shared::{ModeSnapshot, SharedState};
