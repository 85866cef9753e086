//! Compile-time station settings
//!
//! Values come from the `.env` file exported by `build.rs`; empty defaults
//! keep the firmware building without one, but Wi-Fi and notifications will
//! obviously not work.

use skywatch_core::config::{Config, InternetConfig, NotifyConfig, SamplingConfig};

pub const WIFI_SSID: &str = match option_env!("SKYWATCH_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};

pub const WIFI_PASSWORD: &str = match option_env!("SKYWATCH_WIFI_PASSWORD") {
    Some(password) => password,
    None => "",
};

pub const BOT_TOKEN: &str = match option_env!("SKYWATCH_BOT_TOKEN") {
    Some(token) => token,
    None => "",
};

pub const CHAT_ID: &str = match option_env!("SKYWATCH_CHAT_ID") {
    Some(chat) => chat,
    None => "",
};

/// Seconds between forwarded reports.
pub const NOTIFY_INTERVAL_SECONDS: u32 = 60;

pub fn station_config() -> Config<'static> {
    Config {
        internet: InternetConfig {
            ssid: WIFI_SSID,
            password: WIFI_PASSWORD,
        },
        notify: NotifyConfig {
            bot_token: BOT_TOKEN,
            chat_id: CHAT_ID,
            interval_seconds: NOTIFY_INTERVAL_SECONDS,
        },
        sampling: SamplingConfig::default(),
    }
}
