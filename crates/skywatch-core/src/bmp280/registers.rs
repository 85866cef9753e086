//! Register map and typed operating-mode settings

/// Base of the 24-byte factory calibration region.
pub(crate) const CALIBRATION: u8 = 0x88;
/// Measurement control: oversampling factors and power mode.
pub(crate) const CTRL_MEAS: u8 = 0xF4;
/// Standby interval and IIR filter coefficient.
pub(crate) const CONFIG: u8 = 0xF5;
/// Start of the 6-byte pressure/temperature data burst.
pub(crate) const DATA: u8 = 0xF7;

/// Oversampling factor for a single measurement channel (`osrs` encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oversampling {
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Oversampling {
    const fn bits(self) -> u8 {
        match self {
            Self::Skipped => 0b000,
            Self::X1 => 0b001,
            Self::X2 => 0b010,
            Self::X4 => 0b011,
            Self::X8 => 0b100,
            Self::X16 => 0b101,
        }
    }
}

/// Sensor power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    Sleep,
    Forced,
    /// Continuous measurement at the configured standby interval.
    Normal,
}

impl PowerMode {
    const fn bits(self) -> u8 {
        match self {
            Self::Sleep => 0b00,
            Self::Forced => 0b01,
            Self::Normal => 0b11,
        }
    }
}

/// Standby interval between measurements in normal mode (`t_sb` encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandbyTime {
    Ms0_5,
    Ms62_5,
    Ms125,
    Ms250,
    Ms500,
    Ms1000,
    Ms2000,
    Ms4000,
}

impl StandbyTime {
    const fn bits(self) -> u8 {
        match self {
            Self::Ms0_5 => 0b000,
            Self::Ms62_5 => 0b001,
            Self::Ms125 => 0b010,
            Self::Ms250 => 0b011,
            Self::Ms500 => 0b100,
            Self::Ms1000 => 0b101,
            Self::Ms2000 => 0b110,
            Self::Ms4000 => 0b111,
        }
    }
}

/// Internal IIR filter coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Off,
    X2,
    X4,
    X8,
    X16,
}

impl Filter {
    const fn bits(self) -> u8 {
        match self {
            Self::Off => 0b000,
            Self::X2 => 0b001,
            Self::X4 => 0b010,
            Self::X8 => 0b011,
            Self::X16 => 0b100,
        }
    }
}

/// Operating-mode settings written by [`crate::bmp280::Bmp280::configure`].
///
/// The default reproduces the station's standard bring-up: ×1 oversampling on
/// both channels in normal mode (`ctrl_meas` = `0x27`), 1000 ms standby with
/// the filter off (`config` = `0xA0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub mode: PowerMode,
    pub standby: StandbyTime,
    pub filter: Filter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X1,
            mode: PowerMode::Normal,
            standby: StandbyTime::Ms1000,
            filter: Filter::Off,
        }
    }
}

impl Config {
    /// Encoded `ctrl_meas` register: `osrs_t[7:5] | osrs_p[4:2] | mode[1:0]`.
    pub const fn ctrl_meas_bits(&self) -> u8 {
        (self.temperature_oversampling.bits() << 5)
            | (self.pressure_oversampling.bits() << 2)
            | self.mode.bits()
    }

    /// Encoded `config` register: `t_sb[7:5] | filter[4:2]`.
    pub const fn config_bits(&self) -> u8 {
        (self.standby.bits() << 5) | (self.filter.bits() << 2)
    }
}
