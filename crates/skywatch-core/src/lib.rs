//! Hardware-independent core library for skywatch-rs
//!
//! This crate contains all platform-agnostic logic for the skywatch weather
//! monitoring station: the BMP280 barometric driver, sensor trait definitions,
//! digital boundary sensors, report formatting, and configuration types.
//!
//! It is `#![no_std]` so it compiles on both embedded targets (ESP32) and
//! desktop hosts (for tests).

#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(test)]
pub(crate) mod test_support;

pub mod bmp280;
pub mod config;
pub mod report;
pub mod sensors;
