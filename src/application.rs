//! Application layer: drives the servo through the sweep pattern

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::PwmPin;

use crate::drivers::Servo;
use crate::sweep::{Phase, Step, SweepPattern};

/// Main loop state. Borrows the servo exclusively so nothing else can
/// write the pulse width while the sweep runs.
pub struct SweepController<'a, P, D> {
    servo: &'a mut Servo<P>,
    delay: D,
    pattern: SweepPattern,
}

impl<'a, P, D> SweepController<'a, P, D>
where
    P: PwmPin<Duty = u16>,
    D: DelayMs<u16>,
{
    /// Controller running the compiled-in pattern
    pub fn new(servo: &'a mut Servo<P>, delay: D) -> Self {
        Self::with_pattern(servo, delay, SweepPattern::default())
    }

    pub fn with_pattern(servo: &'a mut Servo<P>, delay: D, pattern: SweepPattern) -> Self {
        Self {
            servo,
            delay,
            pattern,
        }
    }

    /// Set the next pulse width, then block for its hold time
    pub fn step(&mut self) -> Step {
        let step = self.pattern.next_step();
        self.servo.set_pulse_width(step.pulse);
        self.delay.delay_ms(step.hold_ms);
        step
    }

    /// Run until the pattern is back at the start of the ascending sweep.
    /// Returns the number of steps taken.
    pub fn run_cycle<F: FnMut(&Step)>(&mut self, mut on_step: F) -> u32 {
        let mut steps = 0;
        loop {
            let step = self.step();
            on_step(&step);
            steps += 1;
            if self.pattern.at_cycle_start() {
                return steps;
            }
        }
    }

    /// Firmware main loop, never returns
    pub fn run<F: FnMut(&Step)>(&mut self, mut on_step: F) -> ! {
        loop {
            let step = self.step();
            on_step(&step);
        }
    }

    pub fn phase(&self) -> Phase {
        self.pattern.phase()
    }

    pub fn release(self) -> D {
        self.delay
    }
}
