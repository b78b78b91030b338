// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Potentiometer input on ADC1 using direct PAC register access.
//!
//! Blocking single-channel reads, 12-bit, right-aligned. With [`POT_SAMPLE_TIME`] a conversion takes
//! 68 ADC cycles, about 17 us at PCLK2 / 4 from the 16 MHz HSI. That is short enough to run inside
//! the step-tick interrupt without holding off the console receive interrupt for a whole character.
//!
//! Example:
//! ```ignore
//! let mut pot = PotSensor::new(dp.ADC1, pins.pot.wiper, 3);
//! let value = pot.read();
//! ```

use stm32f7xx_hal::{
    gpio::{gpioa, Analog},
    pac,
};

use crate::config::POT_SAMPLE_TIME;
use crate::control::PositionSensor;

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / ADC_PRESCALER
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_basic_adc(adc: &pac::adc1::RegisterBlock) {
    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    // Power on
    adc.cr2.modify(|_, w| w.adon().set_bit());
}

/// Select `channel` (0..=9) as the only conversion, with sample-time code `smp`.
fn configure_channel(adc: &pac::adc1::RegisterBlock, channel: u8, smp: u8) {
    let smp = smp & 0b111;
    adc.smpr2.modify(|_, w| match channel {
        0 => w.smp0().bits(smp),
        1 => w.smp1().bits(smp),
        2 => w.smp2().bits(smp),
        3 => w.smp3().bits(smp),
        4 => w.smp4().bits(smp),
        5 => w.smp5().bits(smp),
        6 => w.smp6().bits(smp),
        7 => w.smp7().bits(smp),
        8 => w.smp8().bits(smp),
        9 => w.smp9().bits(smp),
        _ => w,
    });

    // Sequence length = 1 conversion
    adc.sqr1.modify(|_, w| w.l().bits(0));

    adc.sqr3
        .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });
}

/// Potentiometer wiper on one ADC1 channel.
pub struct PotSensor {
    adc: pac::ADC1,
    _wiper: gpioa::PA3<Analog>,
}

impl PotSensor {
    /// Enable and initialize ADC1 for `channel`, the channel wired to `wiper`.
    pub fn new(adc1: pac::ADC1, wiper: gpioa::PA3<Analog>, channel: u8) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_basic_adc(&adc1);
        configure_channel(&adc1, channel, POT_SAMPLE_TIME);

        Self {
            adc: adc1,
            _wiper: wiper,
        }
    }

    /// Run one conversion and wait for the result.
    pub fn read(&self) -> u16 {
        self.adc.cr2.modify(|_, w| w.swstart().set_bit());

        while self.adc.sr.read().eoc().bit_is_clear() {}

        self.adc.dr.read().data().bits() as u16
    }
}

impl PositionSensor for PotSensor {
    #[inline]
    fn sample(&mut self) -> u16 {
        self.read()
    }
}
