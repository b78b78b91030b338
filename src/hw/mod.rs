// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Board Layer
//!
//! MCU-level wrappers for the Nucleo-F767ZI. Only built with the `board` feature.
//!
//! ## Modules
//!
//! - [`adc`] - Blocking single-channel ADC1 reads for the potentiometer.
//! - [`coils`] - Four-pin coil output written in one store.
//! - [`led`] - Status LED.
//! - [`pins`] - Pin assignments.
//! - [`timer`] - Step and housekeeping timers.
//! - [`usart`] - Debug terminal output and command input.

pub mod adc;
pub mod coils;
pub mod led;
pub mod pins;
pub mod timer;
pub mod usart;

pub use adc::PotSensor;
pub use coils::CoilPort;
pub use led::Led;
pub use pins::BoardPins;
pub use timer::{HousekeepingTimer, StepTimer};
pub use usart::{CommandRx, Console};
