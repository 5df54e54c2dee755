//! Configuration constants for the servo sweep firmware
//!
//! Pulse widths are in Timer1 ticks. With the /8 prescaler at 16MHz one tick
//! is 0.5us, so `PULSE_MIN` is roughly 0.5ms and `PULSE_MAX` roughly 2.4ms.

/// CPU frequency in Hz, set by the build script from `F_CPU`
pub const CPU_FREQ_HZ: u32 = parse_hz(env!("MCU_FREQ_HZ"));

/// Servo frame rate
pub const PWM_FREQ_HZ: u32 = 50;

/// Timer1 clock division
pub const PRESCALER: u32 = 8;

/// Timer1 TOP (ICR1) for one 20ms frame
pub const TOP_VALUE: u16 = top_for(CPU_FREQ_HZ, PRESCALER, PWM_FREQ_HZ);

/// Shortest accepted pulse width
pub const PULSE_MIN: u16 = 999;

/// Center position
pub const PULSE_MID: u16 = 2899;

/// Longest accepted pulse width
pub const PULSE_MAX: u16 = 4799;

/// Increment between sweep updates
pub const SWEEP_STEP: u16 = 20;

/// Wait after each sweep update in milliseconds
pub const SWEEP_STEP_DELAY_MS: u16 = 10;

/// Hold at each checkpoint in milliseconds
pub const CHECKPOINT_HOLD_MS: u16 = 500;

/// Diagnostic console baud rate
pub const UART_BAUD: u32 = 9600;

const _: () = assert!(PULSE_MIN < PULSE_MID && PULSE_MID < PULSE_MAX);
const _: () = assert!(PULSE_MAX < TOP_VALUE, "pulse must fit inside the frame");
const _: () = assert!(SWEEP_STEP > 0);

/// Counter TOP that makes `cpu_hz / prescaler` overflow `freq_hz` times a second.
pub const fn top_for(cpu_hz: u32, prescaler: u32, freq_hz: u32) -> u16 {
    let ticks = cpu_hz / (prescaler * freq_hz);
    assert!(ticks >= 2 && ticks - 1 <= u16::MAX as u32, "frame does not fit a 16-bit counter");
    (ticks - 1) as u16
}

/// Duration of `ticks` Timer1 counts in microseconds
pub const fn ticks_to_micros(ticks: u32) -> u32 {
    ((ticks as u64 * PRESCALER as u64 * 1_000_000) / CPU_FREQ_HZ as u64) as u32
}

/// Length of one PWM frame for a given TOP. The counter runs 0..=TOP.
pub const fn frame_period_us(top: u16) -> u32 {
    ticks_to_micros(top as u32 + 1)
}

/// Accepts the forms avr-gcc users pass in `F_CPU`: `16000000`,
/// `16000000UL`, `16_000_000`.
const fn parse_hz(raw: &str) -> u32 {
    let bytes = raw.as_bytes();
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b'U' | b'u' | b'L' | b'l') {
        end -= 1;
    }

    let mut value: u32 = 0;
    let mut i = 0;
    while i < end {
        let b = bytes[i];
        if b != b'_' {
            assert!(b.is_ascii_digit(), "F_CPU must be a decimal frequency in Hz");
            value = value * 10 + (b - b'0') as u32;
        }
        i += 1;
    }
    assert!(value > 0, "F_CPU must be non-zero");
    value
}
