//! Register-level drivers for the ATmega328P
pub mod pwm;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use pwm::Timer1Pwm;
pub use timer::BusyDelay;
pub use uart::Uart;
