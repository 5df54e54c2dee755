//! Servo sweep firmware for the ATmega328P
//!
//! Timer1 generates a 50Hz frame on OC1A and the application steps the pulse
//! width through a fixed sweep-and-checkpoint pattern forever. Everything
//! except `hal` is target independent and tested on the host.

#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod drivers;
#[cfg(target_arch = "avr")]
pub mod hal;
pub mod sweep;

pub use application::SweepController;
pub use drivers::{PulseWidth, Servo};
pub use sweep::{Phase, Step, SweepConfig, SweepPattern};
