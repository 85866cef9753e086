//! BMP280 barometric pressure and temperature sensor driver
//!
//! Register-level I2C driver: reads the factory calibration block once at
//! construction, configures continuous measurement, then burst-reads raw ADC
//! counts and runs them through the vendor's 64-bit fixed-point compensation
//! formulas.
//!
//! # Reading order
//!
//! Pressure compensation consumes the fine-temperature value produced by
//! temperature compensation. [`Bmp280::read_all`] always compensates
//! temperature first and is the recommended entry point. Calling
//! [`Bmp280::read_pressure`] on its own reuses the fine temperature from the
//! most recent temperature read; if temperature was never read, the result is
//! deterministic but physically wrong. See [`calibration::FineTemperature`].

pub mod altitude;
pub mod calibration;
pub mod registers;
mod transport;

use embedded_hal_async::i2c::I2c;
use log::warn;

pub use altitude::{DEFAULT_SEA_LEVEL_HPA, InvalidReading, pressure_altitude};
pub use calibration::{Calibration, FineTemperature};
pub use registers::{Config, Filter, Oversampling, PowerMode, StandbyTime};
use transport::RegisterTransport;

/// Default I2C address of the BMP280 (SDO pulled low).
pub const DEFAULT_ADDRESS: u8 = 0x76;

/// BMP280 driver errors, generic over the bus error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The addressed device did not acknowledge or the transfer was
    /// truncated. Not retried here; retry policy belongs to the caller.
    Bus(E),
    /// The calibration block could not be read at construction time. Fatal:
    /// no driver handle is produced.
    Calibration(E),
    /// A non-positive pressure was fed into the altitude formula.
    InvalidReading(InvalidReading),
}

impl<E> From<InvalidReading> for Error<E> {
    fn from(err: InvalidReading) -> Self {
        Self::InvalidReading(err)
    }
}

/// Uncompensated 20-bit ADC counts from one burst read.
///
/// Transient by design: decoded from the 6-byte data-register burst and
/// consumed immediately by compensation, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub temperature: u32,
    pub pressure: u32,
}

impl RawSample {
    /// Decodes a 6-byte burst starting at the data register.
    ///
    /// The sensor lays its data registers out pressure-first. Each value is a
    /// big-endian 24-bit triple whose low nibble carries fractional bits this
    /// driver discards.
    pub const fn from_burst(data: &[u8; 6]) -> Self {
        Self {
            pressure: decode_counts(data[0], data[1], data[2]),
            temperature: decode_counts(data[3], data[4], data[5]),
        }
    }
}

const fn decode_counts(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    (((msb as u32) << 16) | ((lsb as u32) << 8) | (xlsb as u32)) >> 4
}

/// One compensated reading cycle. Ownership passes to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalReading {
    /// Temperature in hundredths of a degree Celsius.
    pub temperature_centi_celsius: i32,
    /// Pressure in Pa as unsigned Q24.8 fixed point (value / 256 = Pa).
    pub pressure_q24_8: u32,
    /// Altitude in meters above the configured sea level. Meaningless when
    /// [`PhysicalReading::pressure_fault`] is set.
    pub altitude_meters: f32,
}

impl PhysicalReading {
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature_centi_celsius as f32 / 100.0
    }

    pub fn pressure_pa(&self) -> f32 {
        self.pressure_q24_8 as f32 / 256.0
    }

    pub fn pressure_hpa(&self) -> f32 {
        self.pressure_q24_8 as f32 / 25600.0
    }

    /// True when pressure compensation hit its zero-denominator guard and
    /// returned the `0` sentinel. A true zero pressure is physically
    /// impossible, so this always indicates a calibration or raw-data fault,
    /// never a valid reading.
    pub const fn pressure_fault(&self) -> bool {
        self.pressure_q24_8 == 0
    }
}

/// One physical BMP280 behind an I2C bus.
///
/// Single-owner and synchronous: every call blocks on the underlying bus
/// transfer and there is no internal locking, timeout, or retry. Callers
/// sharing the bus between devices must serialize access themselves.
pub struct Bmp280<I> {
    transport: RegisterTransport<I>,
    calibration: Calibration,
    fine_temperature: FineTemperature,
}

impl<I: I2c> Bmp280<I> {
    /// Constructs a driver handle: reads the calibration block (exactly once
    /// per sensor lifetime) and configures continuous measurement with
    /// [`Config::default`].
    pub async fn new(i2c: I, address: u8) -> Result<Self, Error<I::Error>> {
        let mut transport = RegisterTransport::new(i2c, address);

        let mut block = [0u8; Calibration::BLOCK_LEN];
        transport
            .read(registers::CALIBRATION, &mut block)
            .await
            .map_err(Error::Calibration)?;

        let mut sensor = Self {
            transport,
            calibration: Calibration::from_le_block(&block),
            fine_temperature: FineTemperature::STALE,
        };
        sensor.configure(&Config::default()).await?;
        Ok(sensor)
    }

    /// [`Bmp280::new`] at the default address `0x76`.
    pub async fn with_default_address(i2c: I) -> Result<Self, Error<I::Error>> {
        Self::new(i2c, DEFAULT_ADDRESS).await
    }

    /// Writes the measurement-control and config registers.
    ///
    /// Fire-and-forget, matching the sensor's design: no readback is
    /// performed, and a misconfiguration surfaces only as implausible later
    /// readings.
    pub async fn configure(&mut self, config: &Config) -> Result<(), Error<I::Error>> {
        self.transport
            .write(registers::CTRL_MEAS, config.ctrl_meas_bits())
            .await
            .map_err(Error::Bus)?;
        self.transport
            .write(registers::CONFIG, config.config_bits())
            .await
            .map_err(Error::Bus)
    }

    /// Burst-reads the six data registers into a [`RawSample`].
    pub async fn read_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut data = [0u8; 6];
        self.transport
            .read(registers::DATA, &mut data)
            .await
            .map_err(Error::Bus)?;
        Ok(RawSample::from_burst(&data))
    }

    /// Compensated temperature in hundredths of a degree Celsius.
    ///
    /// Also refreshes the fine-temperature value consumed by the next
    /// pressure compensation.
    pub async fn read_temperature(&mut self) -> Result<i32, Error<I::Error>> {
        let raw = self.read_raw().await?;
        let (temperature, fine) =
            calibration::compensate_temperature(raw.temperature, &self.calibration);
        self.fine_temperature = fine;
        Ok(temperature)
    }

    /// Compensated pressure in Pa as Q24.8 fixed point.
    ///
    /// Reuses the fine temperature from the most recent
    /// [`Bmp280::read_temperature`] or [`Bmp280::read_all`]. If temperature
    /// has never been read on this handle the result is deterministic but
    /// wrong; prefer [`Bmp280::read_all`], which enforces the ordering.
    pub async fn read_pressure(&mut self) -> Result<u32, Error<I::Error>> {
        let raw = self.read_raw().await?;
        Ok(calibration::compensate_pressure(
            raw.pressure,
            &self.calibration,
            self.fine_temperature,
        ))
    }

    /// Altitude in meters for the given sea-level reference pressure.
    ///
    /// Runs a full [`Bmp280::read_all`] cycle; the pressure-fault sentinel is
    /// surfaced as [`Error::InvalidReading`].
    pub async fn read_altitude(&mut self, sea_level_hpa: f32) -> Result<f32, Error<I::Error>> {
        let reading = self.read_all(sea_level_hpa).await?;
        if reading.pressure_fault() {
            return Err(InvalidReading.into());
        }
        Ok(reading.altitude_meters)
    }

    /// One full reading cycle: temperature, then pressure, then altitude.
    ///
    /// This is the ordering-safe entry point: temperature compensation always
    /// runs first, so pressure never sees a stale fine temperature. When the
    /// pressure sentinel fires, `altitude_meters` is set to `0.0` and
    /// [`PhysicalReading::pressure_fault`] reports the degraded cycle.
    pub async fn read_all(
        &mut self,
        sea_level_hpa: f32,
    ) -> Result<PhysicalReading, Error<I::Error>> {
        let raw = self.read_raw().await?;

        let (temperature, fine) =
            calibration::compensate_temperature(raw.temperature, &self.calibration);
        self.fine_temperature = fine;
        let pressure = calibration::compensate_pressure(raw.pressure, &self.calibration, fine);

        let altitude_meters = if pressure == 0 {
            warn!(
                "BMP280 at 0x{:02x}: pressure compensation hit the zero-denominator guard",
                self.transport.address()
            );
            0.0
        } else {
            // Positive Q24.8 pressure cannot fail the altitude formula.
            pressure_altitude(pressure as f32 / 25600.0, sea_level_hpa)
                .map_err(Error::InvalidReading)?
        };

        Ok(PhysicalReading {
            temperature_centi_celsius: temperature,
            pressure_q24_8: pressure,
            altitude_meters,
        })
    }

    /// Releases the underlying bus.
    pub fn release(self) -> I {
        self.transport.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        Expectation, MockI2c, block_on, datasheet_calibration_block,
    };
    use std::vec;
    use std::vec::Vec;

    // Datasheet reference ADC counts, encoded as they appear in the data
    // registers: pressure 415148, temperature 519888.
    const DATA_BURST: [u8; 6] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];

    fn construction_script() -> Vec<Expectation> {
        vec![
            Expectation::write_read(&[0x88], &datasheet_calibration_block()),
            Expectation::write(&[0xF4, 0x27]),
            Expectation::write(&[0xF5, 0xA0]),
        ]
    }

    fn sensor_with(extra: Vec<Expectation>) -> Bmp280<MockI2c> {
        let mut script = construction_script();
        script.extend(extra);
        block_on(Bmp280::with_default_address(MockI2c::new(
            DEFAULT_ADDRESS,
            script,
        )))
        .unwrap()
    }

    #[test]
    fn test_construction_reads_calibration_then_configures() {
        let sensor = sensor_with(vec![]);
        assert_eq!(sensor.calibration.dig_t1, 27504);
        assert_eq!(sensor.calibration.dig_p9, 6000);
        assert_eq!(sensor.fine_temperature, FineTemperature::STALE);
        sensor.release().assert_finished();
    }

    #[test]
    fn test_calibration_read_failure_is_fatal() {
        let bus = MockI2c::new(DEFAULT_ADDRESS, vec![Expectation::failing(&[0x88])]);
        match block_on(Bmp280::with_default_address(bus)) {
            Err(Error::Calibration(_)) => {}
            Err(other) => panic!("expected a calibration error, got {other:?}"),
            Ok(_) => panic!("construction must fail when the calibration read fails"),
        }
    }

    #[test]
    fn test_read_all_compensates_temperature_before_pressure() {
        let mut sensor = sensor_with(vec![Expectation::write_read(&[0xF7], &DATA_BURST)]);
        let reading = block_on(sensor.read_all(DEFAULT_SEA_LEVEL_HPA)).unwrap();

        assert_eq!(reading.temperature_centi_celsius, 2508);
        assert_eq!(reading.pressure_q24_8, 25_767_233);
        assert!((reading.altitude_meters - 56.08).abs() < 0.05);
        // The cycle's token stays on the handle for a later lone pressure read.
        assert_eq!(sensor.fine_temperature, FineTemperature::from_raw(128_422));
        sensor.release().assert_finished();
    }

    #[test]
    fn test_lone_pressure_read_reuses_last_token() {
        let mut sensor = sensor_with(vec![
            Expectation::write_read(&[0xF7], &DATA_BURST),
            Expectation::write_read(&[0xF7], &DATA_BURST),
        ]);
        // Never reading temperature first is defined but wrong: the stale
        // token produces the documented deterministic value.
        let stale = block_on(sensor.read_pressure()).unwrap();
        assert_eq!(stale, 24_786_192);

        let _ = block_on(sensor.read_temperature()).unwrap();
        sensor.release().assert_finished();
    }

    #[test]
    fn test_data_read_bus_error_propagates() {
        let mut sensor = sensor_with(vec![Expectation::failing(&[0xF7])]);
        match block_on(sensor.read_all(DEFAULT_SEA_LEVEL_HPA)) {
            Err(Error::Bus(_)) => {}
            other => panic!("expected a bus error, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_decode_matches_shift_formula() {
        // (b0 << 16 | b1 << 8 | b2) >> 4
        assert_eq!(decode_counts(0x7E, 0x2C, 0x80), 516808);
        assert_eq!(decode_counts(0x00, 0x00, 0x00), 0);
        assert_eq!(decode_counts(0xFF, 0xFF, 0xFF), 0xF_FFFF);
    }

    #[test]
    fn test_burst_layout_is_pressure_first() {
        let burst = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];
        let sample = RawSample::from_burst(&burst);
        assert_eq!(sample.pressure, 0x655AC0 >> 4);
        assert_eq!(sample.temperature, 0x7EED00 >> 4);
    }

    #[test]
    fn test_low_nibble_is_discarded() {
        let a = RawSample::from_burst(&[0x12, 0x34, 0x50, 0xAB, 0xCD, 0xE0]);
        let b = RawSample::from_burst(&[0x12, 0x34, 0x5F, 0xAB, 0xCD, 0xEF]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pressure_fault_flags_the_sentinel() {
        let degraded = PhysicalReading {
            temperature_centi_celsius: 2508,
            pressure_q24_8: 0,
            altitude_meters: 0.0,
        };
        assert!(degraded.pressure_fault());

        let healthy = PhysicalReading {
            temperature_centi_celsius: 2508,
            pressure_q24_8: 25_767_233,
            altitude_meters: 56.1,
        };
        assert!(!healthy.pressure_fault());
    }

    #[test]
    fn test_fixed_point_unit_accessors() {
        let reading = PhysicalReading {
            temperature_centi_celsius: 2508,
            pressure_q24_8: 25_767_233,
            altitude_meters: 56.1,
        };
        assert!((reading.temperature_celsius() - 25.08).abs() < 1e-6);
        assert!((reading.pressure_pa() - 100_653.25).abs() < 0.01);
        assert!((reading.pressure_hpa() - 1006.5325).abs() < 0.001);
    }
}
