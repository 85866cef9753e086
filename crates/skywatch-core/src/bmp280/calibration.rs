//! Factory calibration block and the vendor compensation formulas
//!
//! The compensation math is the manufacturer's 64-bit integer reference
//! algorithm, not a floating-point ideal-gas computation. Every shift and
//! division is an integer operation; swapping any step for float division
//! changes the low-order bits and breaks the datasheet reference fixtures.

/// The 12 fixed-point calibration coefficients, factory-programmed into the
/// sensor and read exactly once per driver lifetime.
///
/// T1 and P1 are unsigned; every other coefficient is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Calibration {
    /// Size of the contiguous calibration region in the register file.
    pub const BLOCK_LEN: usize = 24;

    /// Parses the raw little-endian calibration block: three temperature
    /// fields (unsigned, signed, signed) followed by nine pressure fields
    /// (unsigned, then eight signed).
    pub const fn from_le_block(block: &[u8; Self::BLOCK_LEN]) -> Self {
        Self {
            dig_t1: u16::from_le_bytes([block[0], block[1]]),
            dig_t2: i16::from_le_bytes([block[2], block[3]]),
            dig_t3: i16::from_le_bytes([block[4], block[5]]),
            dig_p1: u16::from_le_bytes([block[6], block[7]]),
            dig_p2: i16::from_le_bytes([block[8], block[9]]),
            dig_p3: i16::from_le_bytes([block[10], block[11]]),
            dig_p4: i16::from_le_bytes([block[12], block[13]]),
            dig_p5: i16::from_le_bytes([block[14], block[15]]),
            dig_p6: i16::from_le_bytes([block[16], block[17]]),
            dig_p7: i16::from_le_bytes([block[18], block[19]]),
            dig_p8: i16::from_le_bytes([block[20], block[21]]),
            dig_p9: i16::from_le_bytes([block[22], block[23]]),
        }
    }
}

/// The intermediate value that couples temperature and pressure compensation.
///
/// [`compensate_pressure`] requires one of these, so pressure compensation
/// cannot be written without naming where its temperature context came from.
/// A token is only meaningful for the cycle whose temperature produced it;
/// feeding an old token (or [`FineTemperature::STALE`]) into the pressure
/// formula yields a deterministic but physically wrong value, never a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineTemperature(i32);

impl FineTemperature {
    /// The "temperature was never read" token. Produces a documented,
    /// deterministic, wrong pressure. Exists for diagnostics and tests.
    pub const STALE: Self = Self(0);

    /// Wraps an arbitrary fine-temperature value. Diagnostics only; real
    /// tokens come out of [`compensate_temperature`].
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Vendor temperature compensation.
///
/// Returns the temperature in hundredths of a degree Celsius together with
/// the [`FineTemperature`] token the same cycle's pressure compensation must
/// consume. Intermediates are carried in `i64` so no step can wrap for any
/// 20-bit ADC count.
pub fn compensate_temperature(adc_t: u32, calib: &Calibration) -> (i32, FineTemperature) {
    let adc_t = adc_t as i64;
    let t1 = calib.dig_t1 as i64;

    let var1 = (((adc_t >> 3) - (t1 << 1)) * calib.dig_t2 as i64) >> 11;
    let var2 =
        (((((adc_t >> 4) - t1) * ((adc_t >> 4) - t1)) >> 12) * calib.dig_t3 as i64) >> 14;

    let t_fine = var1 + var2;
    let temperature = (t_fine * 5 + 128) >> 8;
    (temperature as i32, FineTemperature(t_fine as i32))
}

/// Vendor pressure compensation, in Pa as unsigned Q24.8 fixed point.
///
/// A nine-term polynomial in the fine temperature and P1..P9, evaluated in
/// `i64` throughout: several intermediate products exceed 32-bit range and
/// are sign-sensitive. If the intermediate denominator evaluates to exactly
/// zero the function returns the `0` sentinel instead of dividing; callers
/// must treat that as a calibration/raw-data fault, not a physical reading.
pub fn compensate_pressure(adc_p: u32, calib: &Calibration, fine: FineTemperature) -> u32 {
    let var1 = fine.raw() as i64 - 128_000;
    let mut var2 = var1 * var1 * calib.dig_p6 as i64;
    var2 += (var1 * calib.dig_p5 as i64) << 17;
    var2 += (calib.dig_p4 as i64) << 35;
    let var1 = ((var1 * var1 * calib.dig_p3 as i64) >> 8) + ((var1 * calib.dig_p2 as i64) << 12);
    let var1 = (((1i64 << 47) + var1) * calib.dig_p1 as i64) >> 33;

    if var1 == 0 {
        // Zero denominator: degraded-result sentinel, never a division fault.
        return 0;
    }

    let pressure = 1_048_576 - adc_p as i64;
    let pressure = (((pressure << 31) - var2) * 3125) / var1;
    let var1 = (calib.dig_p9 as i64 * (pressure >> 13) * (pressure >> 13)) >> 25;
    let var2 = (calib.dig_p8 as i64 * pressure) >> 19;
    let pressure = ((pressure + var1 + var2) >> 8) + ((calib.dig_p7 as i64) << 4);
    pressure as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference coefficients from the manufacturer's datasheet example.
    const DATASHEET: Calibration = Calibration {
        dig_t1: 27504,
        dig_t2: 26435,
        dig_t3: -1000,
        dig_p1: 36477,
        dig_p2: -10685,
        dig_p3: 3024,
        dig_p4: 2855,
        dig_p5: 140,
        dig_p6: -7,
        dig_p7: 15500,
        dig_p8: -14600,
        dig_p9: 6000,
    };

    const DATASHEET_ADC_T: u32 = 519_888;
    const DATASHEET_ADC_P: u32 = 415_148;

    fn datasheet_block() -> [u8; Calibration::BLOCK_LEN] {
        let mut block = [0u8; Calibration::BLOCK_LEN];
        let fields: [u16; 12] = [
            DATASHEET.dig_t1,
            DATASHEET.dig_t2 as u16,
            DATASHEET.dig_t3 as u16,
            DATASHEET.dig_p1,
            DATASHEET.dig_p2 as u16,
            DATASHEET.dig_p3 as u16,
            DATASHEET.dig_p4 as u16,
            DATASHEET.dig_p5 as u16,
            DATASHEET.dig_p6 as u16,
            DATASHEET.dig_p7 as u16,
            DATASHEET.dig_p8 as u16,
            DATASHEET.dig_p9 as u16,
        ];
        for (i, field) in fields.iter().enumerate() {
            block[i * 2..i * 2 + 2].copy_from_slice(&field.to_le_bytes());
        }
        block
    }

    #[test]
    fn test_calibration_block_round_trip() {
        assert_eq!(Calibration::from_le_block(&datasheet_block()), DATASHEET);
    }

    #[test]
    fn test_calibration_signedness() {
        // T1/P1 must decode unsigned, everything else signed.
        let mut block = [0xFFu8; Calibration::BLOCK_LEN];
        block[0] = 0xE8;
        block[1] = 0x80; // T1 = 0x80E8
        block[6] = 0x17;
        block[7] = 0x90; // P1 = 0x9017
        let calib = Calibration::from_le_block(&block);
        assert_eq!(calib.dig_t1, 0x80E8);
        assert_eq!(calib.dig_p1, 0x9017);
        assert_eq!(calib.dig_t2, -1);
        assert_eq!(calib.dig_t3, -1);
        assert_eq!(calib.dig_p2, -1);
        assert_eq!(calib.dig_p9, -1);
    }

    #[test]
    fn test_temperature_matches_datasheet_example() {
        let (temperature, fine) = compensate_temperature(DATASHEET_ADC_T, &DATASHEET);
        assert_eq!(temperature, 2508, "expected 25.08 degrees C");
        assert_eq!(fine.raw(), 128_422);
    }

    #[test]
    fn test_pressure_matches_datasheet_example() {
        let (_, fine) = compensate_temperature(DATASHEET_ADC_T, &DATASHEET);
        let pressure = compensate_pressure(DATASHEET_ADC_P, &DATASHEET, fine);
        // 25767233 / 256 = 100653.25 Pa; datasheet double-precision reference
        // is 100653.27 Pa.
        assert_eq!(pressure, 25_767_233);
    }

    #[test]
    fn test_stale_fine_temperature_is_deterministic() {
        // Pressure against a never-read temperature must not crash and must
        // reproduce the same (wrong) value every time.
        let first = compensate_pressure(DATASHEET_ADC_P, &DATASHEET, FineTemperature::STALE);
        let second = compensate_pressure(DATASHEET_ADC_P, &DATASHEET, FineTemperature::STALE);
        assert_eq!(first, 24_786_192);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_denominator_returns_sentinel() {
        // P1 = 0 zeroes the denominator regardless of the other terms.
        let mut calib = DATASHEET;
        calib.dig_p1 = 0;
        let (_, fine) = compensate_temperature(DATASHEET_ADC_T, &calib);
        assert_eq!(compensate_pressure(DATASHEET_ADC_P, &calib, fine), 0);
    }

    #[test]
    fn test_extreme_adc_counts_do_not_wrap() {
        // Full-scale 20-bit counts exercise the widest intermediates.
        for adc in [0u32, 1, 0xF_FFFF] {
            let (_, fine) = compensate_temperature(adc, &DATASHEET);
            let _ = compensate_pressure(adc, &DATASHEET, fine);
        }
    }
}
