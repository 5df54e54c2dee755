#[cfg(target_arch = "avr")]
pub mod serial_console;
pub mod servo;

#[cfg(target_arch = "avr")]
pub use serial_console::SerialConsole;
pub use servo::{OutOfRange, PulseWidth, Servo};
