#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use avr_device::atmega328p::Peripherals;
#[cfg(target_arch = "avr")]
use servo_sweep::{
    hal::{BusyDelay, Timer1Pwm},
    Servo, Step, SweepController,
};

#[cfg(all(target_arch = "avr", feature = "console"))]
use servo_sweep::{
    config::{CPU_FREQ_HZ, TOP_VALUE},
    drivers::SerialConsole,
    hal::Uart,
    Phase,
};

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    let dp = Peripherals::take().unwrap();

    // Interrupts stay off: delays poll Timer0 and the PWM runs in hardware
    let pwm = Timer1Pwm::new(dp.TC1, &dp.PORTB);
    let mut servo = Servo::new(pwm);
    let delay = BusyDelay::new(dp.TC0);

    #[cfg(feature = "console")]
    let on_step = {
        let mut console = SerialConsole::new(Uart::new(dp.USART0));
        console.write_line("servo_sweep v0.1.0");
        ufmt::uwriteln!(console, "clock {}Hz, top {}\r", CPU_FREQ_HZ, TOP_VALUE).ok();

        // One line per phase, not per step
        let mut last_phase: Option<Phase> = None;
        move |step: &Step| {
            if last_phase != Some(step.phase) {
                last_phase = Some(step.phase);
                ufmt::uwriteln!(console, "{}\r", step).ok();
            }
        }
    };
    #[cfg(not(feature = "console"))]
    let on_step = |_: &Step| {};

    let mut sweep = SweepController::new(&mut servo, delay);
    sweep.run(on_step)
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("servo_sweep is AVR firmware; build it for an atmega328p target to flash it");
}
