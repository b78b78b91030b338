// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Command Protocol
//!
//! Single-character commands typed on the debug terminal.
//!
//! ## Modules
//!
//! - [`command`] - Command characters and their decoded form.
//! - [`pending`] - Last-write-wins slot between the UART interrupt and the main loop.
//! - [`dispatcher`] - Applies at most one pending command per main-loop pass.

pub mod command;
pub mod dispatcher;
pub mod pending;

pub use command::Command;
pub use dispatcher::CommandDispatcher;
pub use pending::PendingCommand;
