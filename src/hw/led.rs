// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LED, wired active-high.

use stm32f7xx_hal::gpio::{Output, Pin, PushPull};

/// LED on a push-pull output that remembers its last state.
pub struct Led<const P: char, const N: u8> {
    pin: Pin<P, N, Output<PushPull>>,
    is_on: bool,
}

impl<const P: char, const N: u8> Led<P, N> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new(pin: Pin<P, N, Output<PushPull>>) -> Self {
        let mut led = Self { pin, is_on: true };
        led.set(false);
        led
    }

    /// Drive the LED ON (true) or OFF (false). Repeated values skip the pin write.
    pub fn set(&mut self, on: bool) {
        if on == self.is_on {
            return;
        }
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        self.is_on = on;
    }

    #[inline]
    pub fn off(&mut self) {
        self.set(false);
    }
}
