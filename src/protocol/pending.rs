// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-slot command handoff from the UART receive interrupt to the main loop.
//!
//! There is no queue. A byte posted before the previous one was taken replaces it.

use core::sync::atomic::{AtomicU8, Ordering};

/// Slot value meaning "nothing pending".
const EMPTY: u8 = 0;

/// Last-write-wins single-byte mailbox.
#[derive(Debug)]
pub struct PendingCommand {
    slot: AtomicU8,
}

impl PendingCommand {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Store a received byte, overwriting anything not yet taken. NUL is dropped.
    #[inline]
    pub fn post(&self, byte: u8) {
        if byte != EMPTY {
            self.slot.store(byte, Ordering::Release);
        }
    }

    /// Remove and return the pending byte, leaving the slot empty.
    #[inline]
    pub fn take(&self) -> Option<u8> {
        match self.slot.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            byte => Some(byte),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.load(Ordering::Acquire) == EMPTY
    }
}

impl Default for PendingCommand {
    fn default() -> Self {
        Self::new()
    }
}
