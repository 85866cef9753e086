mod bmp280;
pub mod digital;

use core::marker::PhantomData;
use thiserror_no_std::Error;

/// Total number of reading slots in one polling cycle's values array.
pub const MAX_READINGS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("{sensor} initialization failed: {details}")]
    InitializationFailed {
        sensor: &'static str,
        details: &'static str,
    },
    #[error("{sensor} failed to {operation}: {details}")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
        details: &'static str,
    },
    #[error("{sensor} timed out while trying to {operation}")]
    Timeout {
        sensor: &'static str,
        operation: &'static str,
    },
}

/// Trait for sensor reading data structures.
/// Provides compile-time guarantees about the number of values and their conversion to arrays.
pub trait SensorReadings<const COUNT: usize> {
    /// Convert the readings into a fixed-size array.
    fn to_array(self) -> [i32; COUNT];
}

/// Trait for sensors that produce typed readings.
pub trait Sensor<const COUNT: usize> {
    /// The type of readings this sensor produces.
    type Readings: SensorReadings<COUNT>;

    /// Read the sensor and return typed readings.
    fn read(&mut self) -> impl Future<Output = Result<Self::Readings, SensorError>>;
}

// Type-level index markers
pub struct Idx<const N: usize>;

pub struct IndexedSensor<S, const START: usize, const COUNT: usize>
where
    S: Sensor<COUNT>,
{
    sensor: S,
    _marker: PhantomData<Idx<START>>,
}

impl<S, const START: usize, const COUNT: usize> From<S> for IndexedSensor<S, START, COUNT>
where
    S: Sensor<COUNT>,
{
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

impl<S, const START: usize, const COUNT: usize> IndexedSensor<S, START, COUNT>
where
    S: Sensor<COUNT>,
{
    pub const fn new(sensor: S) -> Self {
        Self {
            sensor,
            _marker: PhantomData,
        }
    }

    /// Read and write to the values array at the correct indices.
    /// Type safety ensures the readings are stored at the declared START position.
    pub async fn read_into(&mut self, values: &mut [i32; MAX_READINGS]) -> Result<(), SensorError> {
        let readings = self.sensor.read().await?;
        let data = readings.to_array();
        values[START..START + COUNT].copy_from_slice(&data);
        Ok(())
    }

    /// Get the starting index where this sensor's data is stored.
    pub const fn start_index() -> usize {
        START
    }

    /// Get the number of values this sensor produces.
    pub const fn value_count() -> usize {
        COUNT
    }

    /// Get the absolute index for a specific reading within this sensor.
    /// This provides compile-time calculation of indices, ensuring they match the sensor's position.
    pub const fn reading_index(offset: usize) -> usize {
        START + offset
    }
}

pub mod indices {
    use crate::sensors::IndexedSensor;
    use crate::sensors::bmp280::Bmp280Sensor;
    use crate::sensors::digital::DigitalSensor;

    // There is no compile-time link between a sensor and its slots in the
    // values array except through these types. A sensor producing multiple
    // readings with mismatched indices corrupts data in a way that is very
    // hard to debug, so every slot assignment lives here and nowhere else.

    /// Ambient temperature from the humidity sensor, in hundredths of a
    /// degree Celsius.
    pub const TEMPERATURE: usize = 0;
    /// Relative humidity in hundredths of a percent.
    pub const HUMIDITY: usize = 1;
    /// Barometric temperature in hundredths of a degree Celsius.
    pub const BARO_TEMPERATURE: usize = 2;
    /// Barometric pressure in Pa.
    pub const PRESSURE: usize = 3;
    /// Estimated altitude in centimeters.
    pub const ALTITUDE: usize = 4;
    /// 1 when dark, 0 when light.
    pub const DARKNESS: usize = 5;
    /// 1 when rain is detected.
    pub const RAIN: usize = 6;
    /// 1 when air quality is poor.
    pub const POOR_AIR: usize = 7;

    pub type Bmp280Indexed<I> = IndexedSensor<Bmp280Sensor<I>, BARO_TEMPERATURE, 3>;
    pub type DarknessIndexed<P> = IndexedSensor<DigitalSensor<P>, DARKNESS, 1>;
    pub type RainIndexed<P> = IndexedSensor<DigitalSensor<P>, RAIN, 1>;
    pub type PoorAirIndexed<P> = IndexedSensor<DigitalSensor<P>, POOR_AIR, 1>;
}

pub use bmp280::{Bmp280Readings, Bmp280Sensor};
pub use digital::{ActiveLevel, DigitalReading, DigitalSensor};
pub use indices::*;
