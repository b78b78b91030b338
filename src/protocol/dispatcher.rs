// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Main-loop command dispatcher.
//!
//! Call [`CommandDispatcher::poll`] once per main-loop pass. It takes at most one byte out of the
//! pending slot, decodes it, and applies mode and speed commands. Menu and quit are handed back to
//! the caller, which owns the terminal and the shutdown sequence.
//!
//! ```ignore
//! let mut dispatcher = CommandDispatcher::new(&SHARED, SpeedController::new(config), step_timer);
//!
//! loop {
//!     match dispatcher.poll() {
//!         Some(Command::Menu) => print_menu(&mut console),
//!         Some(Command::Quit) => break,
//!         _ => {}
//!     }
//! }
//! ```

use crate::control::{ReloadTimer, SpeedController};
use crate::motor::MotorMode;
use crate::protocol::Command;
use crate::shared::SharedState;

/// Applies terminal commands to shared state and the step timer.
pub struct CommandDispatcher<'a, T> {
    shared: &'a SharedState,
    speed: SpeedController,
    timer: T,
}

impl<'a, T: ReloadTimer> CommandDispatcher<'a, T> {
    /// Create a dispatcher, program the step timer for the initial speed, and publish it.
    pub fn new(shared: &'a SharedState, speed: SpeedController, mut timer: T) -> Self {
        speed.apply(&mut timer);
        shared.set_rpm(speed.rpm());

        Self {
            shared,
            speed,
            timer,
        }
    }

    /// Consume and apply at most one pending command.
    ///
    /// Returns the decoded command, or `None` if nothing was pending or the byte was not a command.
    pub fn poll(&mut self) -> Option<Command> {
        let byte = self.shared.pending().take()?;

        let Some(command) = Command::from_byte(byte) else {
            debug!("ignoring byte {=u8:#x}", byte);
            return None;
        };

        self.apply(command);
        Some(command)
    }

    /// Apply a decoded command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::AdvanceMode => {
                let next = self.shared.mode().next();
                self.shared.set_mode(next);
                info!("mode: {}", next);
            }
            Command::SpeedUp => {
                self.speed.speed_up(&mut self.timer);
                self.shared.set_rpm(self.speed.rpm());
            }
            Command::SpeedDown => {
                self.speed.speed_down(&mut self.timer);
                self.shared.set_rpm(self.speed.rpm());
            }
            Command::Menu | Command::Quit => {}
        }
    }

    /// Force the motor off. The next step tick de-energizes the windings.
    pub fn shutdown(&mut self) {
        self.shared.set_mode(MotorMode::Off);
        info!("mode: {}", MotorMode::Off);
    }

    #[inline]
    pub fn speed(&self) -> &SpeedController {
        &self.speed
    }

    /// Access the step timer, e.g. to stop it after shutdown.
    #[inline]
    pub fn timer(&mut self) -> &mut T {
        &mut self.timer
    }
}
