// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Coil output port.
//!
//! The four winding pins sit on PF12..PF15, so a whole pattern is applied with one write to the
//! port's bit set/reset register. All windings switch on the same bus cycle.

use stm32f7xx_hal::pac;

use crate::hw::pins::CoilPins;
use crate::motor::{CoilDriver, CoilPattern};

/// Bit position of winding A on GPIOF.
const COIL_SHIFT: u32 = 12;

/// Owns the winding pins and writes patterns to them.
pub struct CoilPort {
    _pins: CoilPins,
    last: CoilPattern,
}

impl CoilPort {
    /// Take the winding pins and de-energize every winding.
    pub fn new(pins: CoilPins) -> Self {
        let mut port = Self {
            _pins: pins,
            last: CoilPattern::OFF,
        };
        port.energize(CoilPattern::OFF);
        port
    }

    /// Pattern most recently written.
    #[inline]
    pub fn last(&self) -> CoilPattern {
        self.last
    }
}

impl CoilDriver for CoilPort {
    fn energize(&mut self, pattern: CoilPattern) {
        let on = u32::from(pattern.bits());
        let off = !on & 0xF;
        let bsrr = (on << COIL_SHIFT) | (off << (COIL_SHIFT + 16));

        // The pins are owned by `self`, so nothing else drives these bits.
        let gpiof = unsafe { &*pac::GPIOF::ptr() };
        gpiof.bsrr.write(|w| unsafe { w.bits(bsrr) });

        self.last = pattern;
    }
}
