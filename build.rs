use std::env;

/// Clock used when `F_CPU` is not set
const DEFAULT_F_CPU: &str = "16000000";

fn main() {
    println!("cargo:rerun-if-env-changed=F_CPU");

    // Pass CPU frequency for timing calculations. `config::parse_hz` checks
    // the digits and strips C-style suffixes at compile time.
    let freq = env::var("F_CPU")
        .map(|raw| raw.trim().to_owned())
        .unwrap_or_else(|_| DEFAULT_F_CPU.to_owned());
    println!("cargo:rustc-env=MCU_FREQ_HZ={}", freq);

    // Only the AVR link needs the MCU flag; host builds run the unit tests
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=atmega328p");
        println!("cargo:warning=Building for ATmega328P at F_CPU={}", freq);
    }
}
