//! Polling, display, and notification tasks
//!
//! One sampler task reads every sensor into the shared values array and
//! publishes a [`Report`] through a watch channel; the display task cycles
//! the LCD pages; the notify task forwards the latest report at its own
//! interval. Per-sensor failures are logged and leave the previous value in
//! place rather than stalling the cycle.

use embassy_net::Stack;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{Receiver, Watch};
use embassy_time::{Duration, Timer};
use esp_hal::Async;
use esp_hal::gpio::{Flex, Input};
use esp_hal::i2c::master::I2c;
use log::warn;

use skywatch_core::report::Report;
use skywatch_core::sensors::{
    Bmp280Indexed, DarknessIndexed, IndexedSensor, MAX_READINGS, PoorAirIndexed, RainIndexed,
    indices,
};

use crate::humidity::Dht11Sensor;
use crate::secrets;

pub type SensorBus = I2c<'static, Async>;
type Dht11Indexed =
    IndexedSensor<Dht11Sensor<Flex<'static>, embassy_time::Delay>, { indices::TEMPERATURE }, 2>;

/// Latest report, observed by the display and notify tasks.
pub static REPORT: Watch<CriticalSectionRawMutex, Report, 2> = Watch::new();

/// Seconds each LCD page stays on screen.
const PAGE_SECONDS: u64 = 2;

/// The station's full sensor complement.
pub struct Sensors {
    pub humidity: Dht11Indexed,
    pub barometer: Bmp280Indexed<SensorBus>,
    pub darkness: DarknessIndexed<Input<'static>>,
    pub rain: RainIndexed<Input<'static>>,
    pub poor_air: PoorAirIndexed<Input<'static>>,
}

#[embassy_executor::task]
pub async fn sampler(mut sensors: Sensors, interval_seconds: u32) {
    let sender = REPORT.sender();
    let mut values = [0i32; MAX_READINGS];

    loop {
        if let Err(e) = sensors.humidity.read_into(&mut values).await {
            warn!("humidity poll failed: {e:?}");
        }
        if let Err(e) = sensors.barometer.read_into(&mut values).await {
            warn!("barometer poll failed: {e:?}");
        }
        if let Err(e) = sensors.darkness.read_into(&mut values).await {
            warn!("light poll failed: {e:?}");
        }
        if let Err(e) = sensors.rain.read_into(&mut values).await {
            warn!("rain poll failed: {e:?}");
        }
        if let Err(e) = sensors.poor_air.read_into(&mut values).await {
            warn!("air quality poll failed: {e:?}");
        }

        sender.send(Report::from_values(&values));
        Timer::after(Duration::from_secs(interval_seconds as u64)).await;
    }
}

#[embassy_executor::task]
pub async fn display_cycle(mut lcd: crate::display::Lcd<I2c<'static, esp_hal::Blocking>>) {
    let mut receiver: Receiver<'static, CriticalSectionRawMutex, Report, 2> =
        REPORT.receiver().expect("too many report receivers");

    let mut report = receiver.changed().await;
    loop {
        for page in report.pages() {
            lcd.show_page(&page);
            Timer::after(Duration::from_secs(PAGE_SECONDS)).await;
        }
        // Pick up fresh values between cycles if any arrived.
        if let Some(latest) = receiver.try_changed() {
            report = latest;
        }
    }
}

#[embassy_executor::task]
pub async fn notify(stack: Stack<'static>) {
    let config = secrets::station_config();
    let mut receiver: Receiver<'static, CriticalSectionRawMutex, Report, 2> =
        REPORT.receiver().expect("too many report receivers");

    loop {
        Timer::after(Duration::from_secs(config.notify.interval_seconds as u64)).await;
        let report = match receiver.try_get() {
            Some(report) => report,
            None => receiver.changed().await,
        };
        crate::notifier::try_send_report(stack, &config.notify, &report.notification()).await;
    }
}
