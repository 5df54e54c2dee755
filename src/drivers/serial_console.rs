use core::convert::Infallible;

use embedded_hal::serial::Write;

use crate::hal::Uart;

/// Output-only diagnostic console
pub struct SerialConsole {
    uart: Uart,
}

impl SerialConsole {
    pub fn new(uart: Uart) -> Self {
        Self { uart }
    }

    pub fn write_line(&mut self, s: &str) {
        ufmt::uWrite::write_str(self, s).ok();
        ufmt::uWrite::write_str(self, "\r\n").ok();
    }
}

impl ufmt::uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            nb::block!(self.uart.write(byte))?;
        }
        Ok(())
    }
}
