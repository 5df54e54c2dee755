//! Bounded pulse-width control for a single hobby servo

use core::fmt;

use embedded_hal::PwmPin;

use crate::config::{ticks_to_micros, PULSE_MAX, PULSE_MID, PULSE_MIN};

/// Pulse width in Timer1 ticks, guaranteed to lie in `[PULSE_MIN, PULSE_MAX]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PulseWidth(u16);

impl PulseWidth {
    pub const MIN: Self = Self(PULSE_MIN);
    pub const MID: Self = Self(PULSE_MID);
    pub const MAX: Self = Self(PULSE_MAX);

    pub const fn new(ticks: u16) -> Option<Self> {
        if ticks < PULSE_MIN || ticks > PULSE_MAX {
            None
        } else {
            Some(Self(ticks))
        }
    }

    #[inline]
    pub const fn ticks(self) -> u16 {
        self.0
    }

    /// High time of the pulse in microseconds
    pub const fn micros(self) -> u32 {
        ticks_to_micros(self.0 as u32)
    }
}

impl TryFrom<u16> for PulseWidth {
    type Error = OutOfRange;

    fn try_from(ticks: u16) -> Result<Self, Self::Error> {
        Self::new(ticks).ok_or(OutOfRange { requested: ticks })
    }
}

impl From<PulseWidth> for u16 {
    fn from(width: PulseWidth) -> u16 {
        width.0
    }
}

/// A pulse request outside `[PULSE_MIN, PULSE_MAX]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub requested: u16,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pulse {} outside {}..={}",
            self.requested, PULSE_MIN, PULSE_MAX
        )
    }
}

impl ufmt::uDisplay for OutOfRange {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uwrite!(
            f,
            "pulse {} outside {}..={}",
            self.requested,
            PULSE_MIN,
            PULSE_MAX
        )
    }
}

/// Servo on one PWM channel whose period is already configured for 50Hz.
///
/// Owning the channel makes this the only writer of the compare register.
/// The committed width is tracked in software; the register is never read
/// back.
pub struct Servo<P> {
    pwm: P,
    pulse: PulseWidth,
}

impl<P: PwmPin<Duty = u16>> Servo<P> {
    /// Load the minimum width and enable the non-inverting output
    pub fn new(mut pwm: P) -> Self {
        pwm.set_duty(PulseWidth::MIN.ticks());
        pwm.enable();

        Self {
            pwm,
            pulse: PulseWidth::MIN,
        }
    }

    /// Commit `pulse` if it is in range. Takes effect at the next frame.
    pub fn try_set_pulse_width(&mut self, pulse: u16) -> Result<(), OutOfRange> {
        let width = PulseWidth::try_from(pulse)?;
        self.pwm.set_duty(width.ticks());
        self.pulse = width;
        Ok(())
    }

    /// Out-of-range requests are dropped and the previous width stays active.
    #[inline]
    pub fn set_pulse_width(&mut self, pulse: u16) {
        self.try_set_pulse_width(pulse).ok();
    }

    #[inline]
    pub fn pulse_width(&self) -> PulseWidth {
        self.pulse
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // The pin mock doubles as the PwmPin mock in this version
    use embedded_hal_mock::pin::{Mock as PwmMock, Transaction as PwmTransaction};
    use std::string::String;

    fn started(extra: &[PwmTransaction]) -> Servo<PwmMock> {
        let mut expectations = vec![
            PwmTransaction::set_duty(PULSE_MIN),
            PwmTransaction::enable(),
        ];
        expectations.extend_from_slice(extra);
        Servo::new(PwmMock::new(&expectations))
    }

    #[test]
    fn new_starts_at_minimum_with_output_enabled() {
        let servo = started(&[]);
        assert_eq!(servo.pulse_width(), PulseWidth::MIN);
        servo.release().done();
    }

    #[test]
    fn in_range_values_are_committed_exactly() {
        let mut servo = started(&[
            PwmTransaction::set_duty(PULSE_MIN),
            PwmTransaction::set_duty(1234),
            PwmTransaction::set_duty(PULSE_MID),
            PwmTransaction::set_duty(PULSE_MAX),
        ]);

        for pulse in [PULSE_MIN, 1234, PULSE_MID, PULSE_MAX] {
            servo.set_pulse_width(pulse);
            assert_eq!(servo.pulse_width().ticks(), pulse);
        }
        servo.release().done();
    }

    #[test]
    fn out_of_range_values_keep_previous_width() {
        let mut servo = started(&[PwmTransaction::set_duty(PULSE_MID)]);
        servo.set_pulse_width(PULSE_MID);

        for pulse in [0, PULSE_MIN - 1, PULSE_MAX + 1, u16::MAX] {
            servo.set_pulse_width(pulse);
            assert_eq!(servo.pulse_width(), PulseWidth::MID);
        }
        // No register writes beyond the one accepted value
        servo.release().done();
    }

    #[test]
    fn try_set_reports_rejected_value() {
        let mut servo = started(&[]);
        assert_eq!(
            servo.try_set_pulse_width(PULSE_MAX + 1),
            Err(OutOfRange {
                requested: PULSE_MAX + 1
            })
        );
        assert_eq!(servo.pulse_width(), PulseWidth::MIN);
        servo.release().done();
    }

    #[test]
    fn repeated_value_is_idempotent() {
        let mut servo = started(&[
            PwmTransaction::set_duty(3000),
            PwmTransaction::set_duty(3000),
        ]);
        servo.set_pulse_width(3000);
        let once = servo.pulse_width();
        servo.set_pulse_width(3000);
        assert_eq!(servo.pulse_width(), once);
        servo.release().done();
    }

    #[test]
    fn pulse_width_bounds_are_inclusive() {
        assert_eq!(PulseWidth::new(PULSE_MIN), Some(PulseWidth::MIN));
        assert_eq!(PulseWidth::new(PULSE_MAX), Some(PulseWidth::MAX));
        assert_eq!(PulseWidth::new(PULSE_MIN - 1), None);
        assert_eq!(PulseWidth::new(PULSE_MAX + 1), None);
        assert_eq!(u16::from(PulseWidth::MID), PULSE_MID);
        assert_eq!(PulseWidth::MID.micros(), 1449);
    }

    #[test]
    fn out_of_range_formats_with_limits() {
        struct Buf(String);
        impl ufmt::uWrite for Buf {
            type Error = core::convert::Infallible;
            fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
                self.0.push_str(s);
                Ok(())
            }
        }

        let err = OutOfRange { requested: 5000 };
        let mut buf = Buf(String::new());
        ufmt::uwrite!(buf, "{}", err).ok();
        assert_eq!(buf.0, "pulse 5000 outside 999..=4799");
        assert_eq!(std::format!("{}", err), buf.0);
    }
}
