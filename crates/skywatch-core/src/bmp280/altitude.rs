//! Altitude estimation from compensated pressure
//!
//! Pure function of pressure and a sea-level reference; the only failure mode
//! is a non-positive pressure input, which cannot be exponentiated.

use thiserror_no_std::Error;

/// Standard atmosphere sea-level pressure in hPa.
pub const DEFAULT_SEA_LEVEL_HPA: f32 = 1013.25;

/// A non-positive pressure was fed into the barometric formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("non-positive pressure cannot be converted to an altitude")]
pub struct InvalidReading;

/// Barometric altitude in meters:
/// `44330 * (1 - (pressure / sea_level) ^ (1 / 5.255))`.
///
/// Monotonically decreasing in pressure for a fixed sea-level reference, and
/// zero when pressure equals the reference.
pub fn pressure_altitude(pressure_hpa: f32, sea_level_hpa: f32) -> Result<f32, InvalidReading> {
    if pressure_hpa <= 0.0 || sea_level_hpa <= 0.0 {
        return Err(InvalidReading);
    }
    Ok(44330.0 * (1.0 - libm::powf(pressure_hpa / sea_level_hpa, 1.0 / 5.255)))
}
