// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767ZI devboard (Nucleo-144).

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, gpiof, Alternate, Analog, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOF);
/// ```
pub struct BoardPins {
    pub leds: Leds,
    pub usart3: Usart3Pins,
    pub coils: CoilPins,
    pub pot: PotPins,
}

pub struct Leds {
    pub green: gpiob::PB0<Output<PushPull>>, // LD1
}

/// ST-LINK virtual COM port
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Motor winding drivers. Must stay on one port in consecutive bits.
pub struct CoilPins {
    pub a: gpiof::PF12<Output<PushPull>>, // D8
    pub b: gpiof::PF13<Output<PushPull>>, // D7
    pub c: gpiof::PF14<Output<PushPull>>, // D4
    pub d: gpiof::PF15<Output<PushPull>>, // D2
}

pub struct PotPins {
    pub wiper: gpioa::PA3<Analog>, // A0, ADC123_IN3
}

impl BoardPins {
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpiof: pac::GPIOF) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpiof = gpiof.split();

        Self {
            leds: Leds {
                green: gpiob.pb0.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            coils: CoilPins {
                a: gpiof.pf12.into_push_pull_output(),
                b: gpiof.pf13.into_push_pull_output(),
                c: gpiof.pf14.into_push_pull_output(),
                d: gpiof.pf15.into_push_pull_output(),
            },

            pot: PotPins {
                wiper: gpioa.pa3.into_analog(),
            },
        }
    }
}
