use crate::sensors::{SensorError, SensorReadings};

use super::Sensor;
use crate::bmp280::{Bmp280, DEFAULT_SEA_LEVEL_HPA};
use embedded_hal_async::i2c::I2c;
use log::{error, warn};

/// Typed readings from the BMP280 sensor.
/// This provides named access to sensor values and ensures type safety.
pub struct Bmp280Readings {
    pub temperature_centi_celsius: i32,
    pub pressure_pa: i32,
    pub altitude_centimeters: i32,
}

impl SensorReadings<3> for Bmp280Readings {
    fn to_array(self) -> [i32; 3] {
        [
            self.temperature_centi_celsius,
            self.pressure_pa,
            self.altitude_centimeters,
        ]
    }
}

/// Polling-framework adapter over the [`Bmp280`] driver.
///
/// Uses the driver's combined read cycle so temperature compensation always
/// runs before pressure compensation.
pub struct Bmp280Sensor<I> {
    sensor: Bmp280<I>,
    sea_level_hpa: f32,
}

impl<I: I2c> Bmp280Sensor<I> {
    pub fn new(sensor: Bmp280<I>) -> Self {
        Self::with_sea_level(sensor, DEFAULT_SEA_LEVEL_HPA)
    }

    pub fn with_sea_level(sensor: Bmp280<I>, sea_level_hpa: f32) -> Self {
        Self {
            sensor,
            sea_level_hpa,
        }
    }
}

impl<I: I2c> Sensor<3> for Bmp280Sensor<I> {
    type Readings = Bmp280Readings;

    async fn read(&mut self) -> Result<Bmp280Readings, SensorError> {
        let reading = self.sensor.read_all(self.sea_level_hpa).await.map_err(|e| {
            error!("BMP280 read cycle failed: {:?}", e);
            SensorError::ReadFailed {
                sensor: "BMP280",
                operation: "read compensated sample",
                details: "I2C communication error",
            }
        })?;

        // The zero-pressure sentinel means the compensation denominator
        // collapsed. Surface it as a fault rather than reporting 0 Pa.
        if reading.pressure_fault() {
            warn!("BMP280 returned the zero-pressure sentinel");
            return Err(SensorError::ReadFailed {
                sensor: "BMP280",
                operation: "compensate pressure",
                details: "zero denominator; calibration or raw-data fault",
            });
        }

        Ok(Bmp280Readings {
            temperature_centi_celsius: reading.temperature_centi_celsius,
            pressure_pa: (reading.pressure_q24_8 >> 8) as i32,
            altitude_centimeters: (reading.altitude_meters * 100.0) as i32,
        })
    }
}
