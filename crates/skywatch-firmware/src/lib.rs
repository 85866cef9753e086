//! ESP32 firmware-specific modules for skywatch-rs
//!
//! This crate contains hardware-specific code that cannot compile on desktop
//! targets: ESP32 peripheral initialization, Wi-Fi bring-up, the character
//! display task, and the notification sender.

#![no_std]

extern crate alloc;

pub mod display;
pub mod humidity;
pub mod notifier;
pub mod secrets;
pub mod tasks;
pub mod wifi;
