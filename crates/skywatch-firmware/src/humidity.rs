//! DHT11 temperature/humidity sensor adapter
//!
//! Wraps the `embedded-dht-rs` driver in the core sensor trait. The DHT11
//! reports whole degrees and whole percent; values are scaled to the
//! hundredths units the readings array uses.

use embedded_dht_rs::dht11::Dht11;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::error;
use skywatch_core::sensors::{Sensor, SensorError, SensorReadings};

pub struct Dht11Readings {
    pub temperature_centi_celsius: i32,
    pub humidity_centi_percent: i32,
}

impl SensorReadings<2> for Dht11Readings {
    fn to_array(self) -> [i32; 2] {
        [self.temperature_centi_celsius, self.humidity_centi_percent]
    }
}

pub struct Dht11Sensor<P, D> {
    sensor: Dht11<P, D>,
}

impl<P, D> Dht11Sensor<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            sensor: Dht11::new(pin, delay),
        }
    }
}

impl<P, D> Sensor<2> for Dht11Sensor<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    type Readings = Dht11Readings;

    async fn read(&mut self) -> Result<Dht11Readings, SensorError> {
        let reading = self.sensor.read().map_err(|e| {
            error!("DHT11 read failed: {:?}", e);
            SensorError::ReadFailed {
                sensor: "DHT11",
                operation: "read temperature/humidity",
                details: "single-wire handshake or checksum failure",
            }
        })?;

        Ok(Dht11Readings {
            temperature_centi_celsius: reading.temperature as i32 * 100,
            humidity_centi_percent: reading.humidity as i32 * 100,
        })
    }
}
