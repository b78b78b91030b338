// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer for the debug terminal.
//!
//! The serial port is split in two:
//! - [`Console`] owns TX and is used from the main loop for the menu and status text.
//! - [`CommandRx`] owns RX and is drained from the receive interrupt into the pending-command slot.
//!
//! [`Console::println`] terminates lines with CRLF for the terminal.
//!
//! To access the terminal on the host machine, connect to the ST-LINK USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```

use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Event, Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::PendingCommand;

/// Split a configured serial port into a console and a command receiver, with the RX-not-empty
/// interrupt enabled.
pub fn split<U: Instance, PINS: Pins<U>>(mut serial: Serial<U, PINS>) -> (Console<U>, CommandRx<U>) {
    serial.listen(Event::Rxne);
    let (tx, rx) = serial.split();
    (Console { tx }, CommandRx { rx })
}

/// Blocking terminal output.
pub struct Console<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Console<U> {
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    pub fn print_u32(&mut self, mut n: u32) {
        let mut buf = [0u8; 10];
        let mut i = buf.len();
        if n == 0 {
            self.write_byte(b'0');
            return;
        }
        while n > 0 {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }
        for &b in &buf[i..] {
            self.write_byte(b);
        }
    }
}

/// Receive side of the terminal.
pub struct CommandRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> CommandRx<U> {
    /// Read every byte waiting in the receiver into `pending`. Only the last one survives.
    ///
    /// Stops at the first receive error (overrun, framing, noise); the HAL clears the flag on read
    /// and the next byte raises the interrupt again.
    pub fn drain_into(&mut self, pending: &PendingCommand) {
        loop {
            match self.rx.read() {
                Ok(byte) => pending.post(byte),
                Err(nb::Error::WouldBlock) | Err(nb::Error::Other(_)) => break,
            }
        }
    }
}
