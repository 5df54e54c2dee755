//! Timer1 fast PWM on OC1A (PB1)
//!
//! Mode 14: the counter runs 0..=ICR1 and the output is set at BOTTOM and
//! cleared on compare match with OCR1A. OCR1A is double-buffered in this mode,
//! so a new duty only applies from the next frame.

use avr_device::atmega328p::{PORTB, TC1};
use embedded_hal::PwmPin;

use crate::config::TOP_VALUE;

// TCCR1A
const COM1A1: u8 = 1 << 7; // Non-inverting output on OC1A
const WGM11: u8 = 1 << 1;

// TCCR1B
const WGM13: u8 = 1 << 4;
const WGM12: u8 = 1 << 3;
const CS11: u8 = 1 << 1; // clk/8

/// OC1A pin on PORTB
const OC1A_PIN: u8 = 1 << 1;

/// Timer1 configured as a 50Hz servo frame generator
pub struct Timer1Pwm {
    tc1: TC1,
}

impl Timer1Pwm {
    /// Configure Timer1 for 50Hz fast PWM and drive PB1 as an output.
    /// The compare output stays disconnected until `enable`.
    pub fn new(tc1: TC1, portb: &PORTB) -> Self {
        unsafe {
            // No timer interrupts, stopped while reconfiguring
            tc1.timsk1.write(|w| w.bits(0));
            tc1.tccr1b.write(|w| w.bits(0));
            tc1.tcnt1.write(|w| w.bits(0));

            tc1.icr1.write(|w| w.bits(TOP_VALUE));
            tc1.tccr1a.write(|w| w.bits(WGM11));
            tc1.tccr1b.write(|w| w.bits(WGM13 | WGM12 | CS11));

            portb.ddrb.modify(|r, w| w.bits(r.bits() | OC1A_PIN));
        }

        Self { tc1 }
    }
}

impl PwmPin for Timer1Pwm {
    type Duty = u16;

    fn disable(&mut self) {
        unsafe {
            self.tc1.tccr1a.modify(|r, w| w.bits(r.bits() & !COM1A1));
        }
    }

    fn enable(&mut self) {
        unsafe {
            self.tc1.tccr1a.modify(|r, w| w.bits(r.bits() | COM1A1));
        }
    }

    fn get_duty(&self) -> u16 {
        self.tc1.ocr1a.read().bits()
    }

    fn get_max_duty(&self) -> u16 {
        TOP_VALUE
    }

    fn set_duty(&mut self, duty: u16) {
        unsafe {
            self.tc1.ocr1a.write(|w| w.bits(duty));
        }
    }
}
