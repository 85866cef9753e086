//! Station configuration
//!
//! Filled in by the firmware from compile-time settings; the core only
//! defines the shape and the defaults.

use serde::{Deserialize, Serialize};

use crate::bmp280::DEFAULT_SEA_LEVEL_HPA;

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(bound(deserialize = "'de: 'a"))]
pub struct Config<'a> {
    pub internet: InternetConfig<'a>,
    pub notify: NotifyConfig<'a>,
    pub sampling: SamplingConfig,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InternetConfig<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

/// Message-API settings for the periodic weather report.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NotifyConfig<'a> {
    pub bot_token: &'a str,
    pub chat_id: &'a str,
    /// Seconds between forwarded reports.
    pub interval_seconds: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Seconds between polling cycles.
    pub interval_seconds: u32,
    /// Sea-level reference pressure for altitude estimation, in hPa.
    pub sea_level_hpa: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 16,
            sea_level_hpa: DEFAULT_SEA_LEVEL_HPA,
        }
    }
}
