use avr_device::atmega328p::TC0;
use core::convert::Infallible;
use embedded_hal::blocking::delay::DelayMs;

use crate::config::CPU_FREQ_HZ;

const WGM01: u8 = 1 << 1; // CTC, TOP = OCR0A
const CS0_DIV64: u8 = 0b011;
const OCF0A: u8 = 1 << 1;

const PRESCALER: u32 = 64;

// 16MHz / 64 = 250kHz, 250 ticks = 1ms
const TICKS_PER_MS: u32 = CPU_FREQ_HZ / PRESCALER / 1000;

const _: () = assert!(TICKS_PER_MS >= 1 && TICKS_PER_MS <= 256);

/// Busy-wait millisecond delay on Timer0. No interrupts involved.
pub struct BusyDelay {
    tc0: TC0,
}

impl BusyDelay {
    pub fn new(tc0: TC0) -> Self {
        unsafe {
            tc0.timsk0.write(|w| w.bits(0));
            tc0.tccr0a.write(|w| w.bits(WGM01));
            tc0.ocr0a.write(|w| w.bits((TICKS_PER_MS - 1) as u8));
            tc0.tcnt0.write(|w| w.bits(0));
            tc0.tccr0b.write(|w| w.bits(CS0_DIV64));
        }
        Self { tc0 }
    }

    fn restart(&mut self) {
        unsafe {
            self.tc0.tcnt0.write(|w| w.bits(0));
            // Flags clear by writing one
            self.tc0.tifr0.write(|w| w.bits(OCF0A));
        }
    }

    /// Completes once per elapsed millisecond
    fn wait_tick(&mut self) -> nb::Result<(), Infallible> {
        if self.tc0.tifr0.read().bits() & OCF0A == 0 {
            return Err(nb::Error::WouldBlock);
        }
        unsafe {
            self.tc0.tifr0.write(|w| w.bits(OCF0A));
        }
        Ok(())
    }
}

impl DelayMs<u16> for BusyDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.restart();
        for _ in 0..ms {
            if let Err(never) = nb::block!(self.wait_tick()) {
                match never {}
            }
        }
    }
}
