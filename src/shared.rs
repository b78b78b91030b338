// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! State shared between the main loop and the interrupt handlers.
//!
//! Each field is a single atomic word, so a reader in any interrupt sees either the old or the new
//! value, never a mix.
//!
//! | Field | Written by | Read by |
//! | ----- | ---------- | ------- |
//! | mode + generation | main loop (dispatcher) | step tick, housekeeping |
//! | rpm | main loop (dispatcher) | housekeeping |
//! | pending | UART receive interrupt | main loop (take) |
//!
//! The mode word also carries a generation counter bumped on every mode write, so the step tick
//! notices a change even when the mode leaves and returns to the same value between two ticks.
//!
//! The step index and follow session are not here; they live in the step-tick context only.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::DEFAULT_RPM;
use crate::motor::MotorMode;
use crate::protocol::PendingCommand;

/// Low byte: mode. Upper 24 bits: generation.
const MODE_MASK: u32 = 0xFF;
const GENERATION_SHIFT: u32 = 8;

/// A mode together with the generation it was written in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSnapshot {
    pub mode: MotorMode,
    /// Wrapping count of mode writes (24 bits)
    pub generation: u32,
}

impl ModeSnapshot {
    #[inline]
    const fn unpack(word: u32) -> Self {
        Self {
            mode: MotorMode::from_raw((word & MODE_MASK) as u8),
            generation: word >> GENERATION_SHIFT,
        }
    }

    #[inline]
    const fn pack(self) -> u32 {
        (self.generation << GENERATION_SHIFT) | self.mode.to_raw() as u32
    }
}

/// Shared motor mode, published speed, and pending command.
#[derive(Debug)]
pub struct SharedState {
    mode: AtomicU32,
    rpm: AtomicU32,
    pending: PendingCommand,
}

impl SharedState {
    /// Starts in [`MotorMode::Off`] at the default speed.
    pub const fn new() -> Self {
        Self {
            mode: AtomicU32::new(MotorMode::Off.to_raw() as u32),
            rpm: AtomicU32::new(DEFAULT_RPM),
            pending: PendingCommand::new(),
        }
    }

    #[inline]
    pub fn mode(&self) -> MotorMode {
        self.mode_snapshot().mode
    }

    /// Mode and generation, read in one load.
    #[inline]
    pub fn mode_snapshot(&self) -> ModeSnapshot {
        ModeSnapshot::unpack(self.mode.load(Ordering::Acquire))
    }

    /// Publish a new mode and bump the generation, even if `mode` equals the current one.
    pub fn set_mode(&self, mode: MotorMode) {
        let _ = self
            .mode
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                let generation = ModeSnapshot::unpack(word).generation.wrapping_add(1)
                    & (u32::MAX >> GENERATION_SHIFT);
                Some(ModeSnapshot { mode, generation }.pack())
            });
    }

    /// Speed last committed by the speed controller.
    #[inline]
    pub fn rpm(&self) -> u32 {
        self.rpm.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_rpm(&self, rpm: u32) {
        self.rpm.store(rpm, Ordering::Release);
    }

    #[inline]
    pub fn pending(&self) -> &PendingCommand {
        &self.pending
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
