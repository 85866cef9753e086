//! Single-bit boundary sensors: rain, light, and air quality
//!
//! These modules expose only a digital output pin, so the whole driver is a
//! level read mapped through the sensor's active level.

use crate::sensors::{Sensor, SensorError, SensorReadings};
use embedded_hal::digital::InputPin;

/// Pin level at which a sensor reports its condition as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    High,
    Low,
}

pub struct DigitalReading {
    pub asserted: bool,
}

impl SensorReadings<1> for DigitalReading {
    fn to_array(self) -> [i32; 1] {
        [self.asserted as i32]
    }
}

/// A threshold sensor read as one digital level.
pub struct DigitalSensor<P> {
    pin: P,
    active: ActiveLevel,
    name: &'static str,
}

impl<P: InputPin> DigitalSensor<P> {
    pub const fn new(pin: P, active: ActiveLevel, name: &'static str) -> Self {
        Self { pin, active, name }
    }

    /// Rain module: the comparator output goes low when the plate is wet.
    pub const fn rain(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low, "rain")
    }

    /// LDR module: the output goes high in darkness.
    pub const fn darkness(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High, "darkness")
    }

    /// Air-quality module: the output goes low when quality is poor.
    pub const fn poor_air(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low, "air quality")
    }
}

impl<P: InputPin> Sensor<1> for DigitalSensor<P> {
    type Readings = DigitalReading;

    async fn read(&mut self) -> Result<DigitalReading, SensorError> {
        let level_high = self.pin.is_high().map_err(|_| {
            log::error!("{} sensor pin read failed", self.name);
            SensorError::ReadFailed {
                sensor: "digital",
                operation: "read input pin",
                details: "GPIO level read failed",
            }
        })?;

        let asserted = match self.active {
            ActiveLevel::High => level_high,
            ActiveLevel::Low => !level_high,
        };
        Ok(DigitalReading { asserted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct FixedPin(bool);

    impl ErrorType for FixedPin {
        type Error = Infallible;
    }

    impl InputPin for FixedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    fn read_now<P: InputPin>(sensor: &mut DigitalSensor<P>) -> bool {
        crate::test_support::block_on(sensor.read()).unwrap().asserted
    }

    #[test]
    fn test_rain_is_active_low() {
        assert!(read_now(&mut DigitalSensor::rain(FixedPin(false))));
        assert!(!read_now(&mut DigitalSensor::rain(FixedPin(true))));
    }

    #[test]
    fn test_darkness_is_active_high() {
        assert!(read_now(&mut DigitalSensor::darkness(FixedPin(true))));
        assert!(!read_now(&mut DigitalSensor::darkness(FixedPin(false))));
    }

    #[test]
    fn test_poor_air_is_active_low() {
        assert!(read_now(&mut DigitalSensor::poor_air(FixedPin(false))));
        assert!(!read_now(&mut DigitalSensor::poor_air(FixedPin(true))));
    }

    #[test]
    fn test_reading_maps_to_binary_slot() {
        assert_eq!(DigitalReading { asserted: true }.to_array(), [1]);
        assert_eq!(DigitalReading { asserted: false }.to_array(), [0]);
    }
}
