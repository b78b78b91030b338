// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LED heartbeat.
//!
//! Counts main-loop passes and reports whether the LED should be lit, giving a short blink at the
//! start of every cycle. The blink rate follows the main-loop rate.

/// Passes per heartbeat cycle.
pub const DEFAULT_PERIOD: u32 = 200_000;
/// Percent of each cycle the LED is lit.
pub const DEFAULT_DUTY_PERCENT: u32 = 5;

/// Loop-pass counter driving a blinking status LED.
#[derive(Debug)]
pub struct Heartbeat {
    period: u32,
    on_for: u32,
    count: u32,
}

impl Heartbeat {
    /// `period` passes per cycle, lit for `duty_percent` of them. A zero period is treated as one.
    pub const fn new(period: u32, duty_percent: u32) -> Self {
        let period = if period == 0 { 1 } else { period };
        let duty = if duty_percent > 100 { 100 } else { duty_percent };
        Self {
            period,
            on_for: (period as u64 * duty as u64 / 100) as u32,
            count: 0,
        }
    }

    /// Advance one pass. Returns `true` while the LED should be on.
    pub fn poll(&mut self) -> bool {
        let lit = self.count < self.on_for;
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
        }
        lit
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, DEFAULT_DUTY_PERCENT)
    }
}
