//! Weather report formatting
//!
//! Turns one polling cycle's readings into the sequential 16x2 LCD pages and
//! the plain-text notification body forwarded over the network API. Pure
//! string work, kept out of the firmware so it can run under host tests.

use core::fmt;
use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::sensors::{MAX_READINGS, indices};

/// Character columns on the display.
pub const LCD_COLS: usize = 16;
/// Banner page plus one page per reading.
pub const PAGE_COUNT: usize = 8;
/// Upper bound for the notification body.
pub const NOTIFICATION_CAPACITY: usize = 256;

/// One 16x2 screen of the sequential display cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdPage {
    pub top: String<LCD_COLS>,
    pub bottom: String<LCD_COLS>,
}

/// One polling cycle's readings in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub temperature_celsius: f32,
    pub humidity_percent: f32,
    pub pressure_hpa: f32,
    pub altitude_meters: f32,
    pub dark: bool,
    pub raining: bool,
    pub air_quality_poor: bool,
}

impl Report {
    /// Builds a report from a polling cycle's values array, using the slot
    /// layout and units documented in [`indices`].
    pub fn from_values(values: &[i32; MAX_READINGS]) -> Self {
        Self {
            temperature_celsius: values[indices::TEMPERATURE] as f32 / 100.0,
            humidity_percent: values[indices::HUMIDITY] as f32 / 100.0,
            pressure_hpa: values[indices::PRESSURE] as f32 / 100.0,
            altitude_meters: values[indices::ALTITUDE] as f32 / 100.0,
            dark: values[indices::DARKNESS] != 0,
            raining: values[indices::RAIN] != 0,
            air_quality_poor: values[indices::POOR_AIR] != 0,
        }
    }

    pub fn light_label(&self) -> &'static str {
        if self.dark { "Dark" } else { "Light" }
    }

    pub fn rain_label(&self) -> &'static str {
        if self.raining { "Yes" } else { "No" }
    }

    pub fn air_quality_label(&self) -> &'static str {
        if self.air_quality_poor { "Bad" } else { "Good" }
    }

    /// The sequential display cycle: a banner page followed by one page per
    /// reading.
    pub fn pages(&self) -> Vec<LcdPage, PAGE_COUNT> {
        let mut pages = Vec::new();
        let mut push = |top: String<LCD_COLS>, bottom: String<LCD_COLS>| {
            // PAGE_COUNT is sized for exactly these pages.
            let _ = pages.push(LcdPage { top, bottom });
        };

        push(line(format_args!("Skywatch")), line(format_args!("Weather Station")));
        push(
            line(format_args!("Temperature:")),
            line(format_args!("{:.1} C", self.temperature_celsius)),
        );
        push(
            line(format_args!("Humidity:")),
            line(format_args!("{:.1} %", self.humidity_percent)),
        );
        push(
            line(format_args!("Pressure:")),
            line(format_args!("{:.0} hPa", self.pressure_hpa)),
        );
        push(
            line(format_args!("Altitude:")),
            line(format_args!("{:.1} m", self.altitude_meters)),
        );
        push(line(format_args!("Rain:")), line(format_args!("{}", self.rain_label())));
        push(
            line(format_args!("Light Status:")),
            line(format_args!("{}", self.light_label())),
        );
        push(
            line(format_args!("Air Quality:")),
            line(format_args!("{}", self.air_quality_label())),
        );
        pages
    }

    /// The plain-text notification body sent to the message API.
    pub fn notification(&self) -> String<NOTIFICATION_CAPACITY> {
        let mut body = String::new();
        // The body is sized so this cannot overflow for any sensor values.
        let _ = write!(
            body,
            "Weather Station\n\
             ------------------------------\n\
             Temperature: {:.1} C\n\
             Humidity: {:.1} %\n\
             Pressure: {:.2} hPa\n\
             Altitude: {:.2} m\n\
             Light Status: {}\n\
             Rain Detected: {}\n\
             Air Quality: {}\n\
             ------------------------------\n\
             Have a great day!",
            self.temperature_celsius,
            self.humidity_percent,
            self.pressure_hpa,
            self.altitude_meters,
            self.light_label(),
            self.rain_label(),
            self.air_quality_label(),
        );
        body
    }
}

/// Formats a display line, silently clipping anything past the last column.
fn line(args: fmt::Arguments<'_>) -> String<LCD_COLS> {
    struct Clipped<'a>(&'a mut String<LCD_COLS>);

    impl fmt::Write for Clipped<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    let mut out = String::new();
    let _ = fmt::write(&mut Clipped(&mut out), args);
    out
}
