// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! StepDrive board firmware.
//!
//! Interrupt layout:
//! - `TIM2` (variable rate): one motor step tick.
//! - `TIM5` (1 Hz): status line with speed and mode.
//! - `USART3` (RX not empty): latch the received character as the pending command.
//!
//! The main loop blinks the status LED and dispatches one pending command per pass.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::interrupt::{self as irq, Mutex};
use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use stepdrive::control::SpeedController;
use stepdrive::heartbeat::Heartbeat;
use stepdrive::hw::{
    self, timer, BoardPins, CoilPort, CommandRx, Console, HousekeepingTimer, Led, PotSensor,
    StepTimer,
};
use stepdrive::config::CONSOLE_BAUD;
use stepdrive::motor::{CoilDriver, CoilPattern, MotorStateMachine};
use stepdrive::protocol::{Command, CommandDispatcher};
use stepdrive::{MotorConfig, SharedState};

/// ADC1 channel wired to the potentiometer (PA3).
const POT_CHANNEL: u8 = 3;

static SHARED: SharedState = SharedState::new();

/// Everything the step tick owns.
struct StepContext {
    machine: MotorStateMachine,
    coils: CoilPort,
    pot: PotSensor,
}

static STEP_CTX: Mutex<RefCell<Option<StepContext>>> = Mutex::new(RefCell::new(None));
static COMMAND_RX: Mutex<RefCell<Option<CommandRx<pac::USART3>>>> =
    Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let timer_hz = clocks.timclk1().raw();

    let config = match MotorConfig::new().with_clock_hz(timer_hz).validate() {
        Ok(config) => config,
        Err(e) => defmt::panic!("invalid motor config: {}", e),
    };

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOF);
    let mut led = Led::new(pins.leds.green);

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: CONSOLE_BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let (mut console, command_rx) = hw::usart::split(serial);

    // Motor
    let coils = CoilPort::new(pins.coils);
    let pot = PotSensor::new(dp.ADC1, pins.pot.wiper, POT_CHANNEL);
    let machine = MotorStateMachine::new(&config);

    // Timers
    let speed = SpeedController::new(config);
    let step_timer = StepTimer::tim2(dp.TIM2, speed.period());
    let mut housekeeping = HousekeepingTimer::tim5(dp.TIM5, timer_hz);
    let mut dispatcher = CommandDispatcher::new(&SHARED, speed, step_timer);

    irq::free(|cs| {
        STEP_CTX.borrow(cs).replace(Some(StepContext {
            machine,
            coils,
            pot,
        }));
        COMMAND_RX.borrow(cs).replace(Some(command_rx));
    });

    unsafe {
        NVIC::unmask(pac::Interrupt::TIM2);
        NVIC::unmask(pac::Interrupt::TIM5);
        NVIC::unmask(pac::Interrupt::USART3);
    }

    print_menu(&mut console);

    dispatcher.timer().start();
    housekeeping.start();
    defmt::info!("running: {} rpm, period {=u32}", SHARED.rpm(), dispatcher.speed().period());

    let mut heartbeat = Heartbeat::default();

    loop {
        led.set(heartbeat.poll());

        match dispatcher.poll() {
            Some(Command::Menu) => print_menu(&mut console),
            Some(Command::Quit) => break,
            _ => {}
        }
    }

    // Shutdown: let one more tick run in OFF so the windings are released, then stop stepping.
    dispatcher.shutdown();
    while !step_tick_released() {
        cortex_m::asm::nop();
    }
    dispatcher.timer().stop();
    housekeeping.stop();
    led.off();

    console.println("Stopped.");
    console.flush();
    defmt::info!("stopped");

    loop {
        cortex_m::asm::wfi();
    }
}

/// True once the step tick has processed OFF and written the de-energized pattern.
fn step_tick_released() -> bool {
    irq::free(|cs| {
        STEP_CTX.borrow(cs).borrow().as_ref().map_or(true, |ctx| {
            !ctx.machine.mode().is_energized() && ctx.coils.last() == CoilPattern::OFF
        })
    })
}

fn print_menu(console: &mut Console<pac::USART3>) {
    console.println("");
    console.println("StepDrive");
    console.println("  s - next mode (off, ccw, cw, follow)");
    console.println("  + - speed up 10 rpm");
    console.println("  - - slow down 10 rpm");
    console.println("  m - show this menu");
    console.println("  q - stop motor and quit");
    console.write_str("Speed: ");
    console.print_u32(SHARED.rpm());
    console.println(" rpm");
}

#[interrupt]
fn TIM2() {
    timer::clear_step_irq();

    irq::free(|cs| {
        if let Some(ctx) = STEP_CTX.borrow(cs).borrow_mut().as_mut() {
            let pattern = ctx.machine.tick_shared(&SHARED, &mut ctx.pot);
            ctx.coils.energize(pattern);
        }
    });
}

#[interrupt]
fn TIM5() {
    timer::clear_housekeeping_irq();

    defmt::info!("rpm {=u32}, mode {}", SHARED.rpm(), SHARED.mode());
}

#[interrupt]
fn USART3() {
    irq::free(|cs| {
        if let Some(rx) = COMMAND_RX.borrow(cs).borrow_mut().as_mut() {
            rx.drain_into(SHARED.pending());
        }
    });
}
