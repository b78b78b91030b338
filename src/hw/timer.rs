// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic update-interrupt timers on TIM2 and TIM5.
//!
//! - TIM2 paces the step tick. Auto-reload preload (ARPE) is on, so a new reload value lands in the
//!   shadow register at the next update event and the period in progress is never cut short.
//! - TIM5 runs the 1 Hz housekeeping tick.
//!
//! Both are 32-bit and run at the APB1 timer clock with no prescaler.

use stm32f7xx_hal::pac;

use crate::control::ReloadTimer;

/// Auto-reload value for a period of `period` timer cycles (the counter runs 0..=ARR).
#[inline]
fn arr_for(period: u32) -> u32 {
    period.max(1) - 1
}

/// Variable-rate step timer (TIM2).
pub struct StepTimer {
    tim: pac::TIM2,
}

impl StepTimer {
    /// Configure TIM2 with update interrupts enabled. The counter stays stopped until
    /// [`start`](Self::start).
    pub fn tim2(tim2: pac::TIM2, period: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(0) });
        tim.arr.write(|w| w.bits(arr_for(period)));

        // Buffer ARR writes; only overflow raises the update flag
        tim.cr1.modify(|_, w| w.arpe().set_bit().urs().set_bit());

        // Load PSC/ARR shadows now
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.dier.modify(|_, w| w.uie().set_bit());

        Self { tim }
    }

    #[inline]
    pub fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline]
    pub fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
    }
}

impl ReloadTimer for StepTimer {
    fn set_reload(&mut self, period: u32) {
        self.tim.arr.write(|w| w.bits(arr_for(period)));
    }
}

/// Acknowledge the TIM2 update interrupt. Call first thing in the handler.
#[inline]
pub fn clear_step_irq() {
    let tim = unsafe { &*pac::TIM2::ptr() };
    tim.sr.modify(|_, w| w.uif().clear_bit());
}

/// Fixed 1 Hz housekeeping timer (TIM5).
pub struct HousekeepingTimer {
    tim: pac::TIM5,
}

impl HousekeepingTimer {
    /// Configure TIM5 to interrupt once per second from a `clock_hz` input clock.
    pub fn tim5(tim5: pac::TIM5, clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim5en().set_bit());

        let tim = tim5;

        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(0) });
        tim.arr.write(|w| w.bits(arr_for(clock_hz)));
        tim.cr1.modify(|_, w| w.urs().set_bit());

        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.dier.modify(|_, w| w.uie().set_bit());

        Self { tim }
    }

    #[inline]
    pub fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline]
    pub fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
    }
}

/// Acknowledge the TIM5 update interrupt.
#[inline]
pub fn clear_housekeeping_irq() {
    let tim = unsafe { &*pac::TIM5::ptr() };
    tim.sr.modify(|_, w| w.uif().clear_bit());
}
