//! 16x2 character LCD behind a PCF8574 I2C backpack
//!
//! Thin wrapper over the `hd44780-driver` crate: clears the panel and writes
//! the two rows of one report page.

use embassy_time::Delay;
use embedded_hal_compat::{Reverse, ReverseCompat};
use hd44780_driver::HD44780;
use hd44780_driver::bus::I2CBus;
use log::warn;
use skywatch_core::report::LcdPage;

/// Second-row DDRAM offset on 16x2 panels.
const SECOND_ROW: u8 = 40;

// `hd44780-driver` still speaks embedded-hal 0.2, so the bus and delay go
// through the `embedded-hal-compat` reverse adapters.
pub struct Lcd<I>
where
    I: embedded_hal::i2c::I2c,
{
    driver: HD44780<I2CBus<Reverse<I>>>,
    delay: Reverse<Delay>,
}

impl<I> Lcd<I>
where
    I: embedded_hal::i2c::I2c,
{
    /// Initializes the panel. The backpack usually answers at `0x27` or
    /// `0x3F` depending on its address jumpers.
    pub fn new(i2c: I, address: u8) -> Result<Self, hd44780_driver::error::Error> {
        let mut delay = Delay.reverse();
        let driver = HD44780::new_i2c(i2c.reverse(), address, &mut delay)?;
        Ok(Self { driver, delay })
    }

    /// Clears the panel and shows one page of the display cycle.
    pub fn show_page(&mut self, page: &LcdPage) {
        // The panel has no readback; a failed write only costs one page of
        // the cycle, so log and move on.
        if self.write_page(page).is_err() {
            warn!("LCD write failed; skipping page");
        }
    }

    fn write_page(&mut self, page: &LcdPage) -> Result<(), hd44780_driver::error::Error> {
        self.driver.clear(&mut self.delay)?;
        self.driver.set_cursor_pos(0, &mut self.delay)?;
        self.driver.write_str(&page.top, &mut self.delay)?;
        self.driver.set_cursor_pos(SECOND_ROW, &mut self.delay)?;
        self.driver.write_str(&page.bottom, &mut self.delay)
    }

    pub fn splash(&mut self, text: &str) {
        let _ = self.driver.clear(&mut self.delay);
        let _ = self.driver.set_cursor_pos(0, &mut self.delay);
        let _ = self.driver.write_str(text, &mut self.delay);
    }
}
