#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Flex, Input, InputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::timer::timg::TimerGroup;
use log::info;
use rtt_target::rprintln;
use static_cell::StaticCell;

use skywatch_core::bmp280::Bmp280;
use skywatch_core::sensors::{DigitalSensor, IndexedSensor};

use skywatch_firmware::humidity::Dht11Sensor;
use skywatch_firmware::{display, secrets, tasks, wifi};

/// LCD backpack address; use 0x27 if the jumpers are unbridged.
const LCD_ADDRESS: u8 = 0x3F;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

static STACK_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_print!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    rprintln!("Embassy initialized!");

    let station = secrets::station_config();

    // Wi-Fi and the network stack.
    let radio_init = esp_radio::init().expect("failed to initialize the radio controller");
    let (controller, interfaces) =
        esp_radio::wifi::new(&radio_init, peripherals.WIFI, Default::default())
            .expect("failed to initialize the Wi-Fi controller");

    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let seed = 0x5339_7761u64; // DHCP/TCP initial sequence randomness only
    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        net_config,
        STACK_RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner.spawn(wifi::connection(controller)).ok();
    spawner.spawn(wifi::net_task(runner)).ok();

    // Sensor bus: BMP280 alone on I2C0 (SDA 21, SCL 22).
    let sensor_bus = I2c::new(peripherals.I2C0, I2cConfig::default())
        .expect("I2C0 init failed")
        .with_sda(peripherals.GPIO21)
        .with_scl(peripherals.GPIO22)
        .into_async();

    let barometer = Bmp280::with_default_address(sensor_bus)
        .await
        .expect("BMP280 initialization failed");

    // Display bus: LCD backpack alone on I2C1 (SDA 27, SCL 26).
    let display_bus = I2c::new(peripherals.I2C1, I2cConfig::default())
        .expect("I2C1 init failed")
        .with_sda(peripherals.GPIO27)
        .with_scl(peripherals.GPIO26);

    let mut lcd = display::Lcd::new(display_bus, LCD_ADDRESS).expect("LCD initialization failed");
    lcd.splash("Initializing...");
    Timer::after(Duration::from_secs(2)).await;

    // Single-wire and digital boundary sensors.
    let dht_pin = Flex::new(peripherals.GPIO23);
    let input = InputConfig::default().with_pull(Pull::None);
    let rain_pin = Input::new(peripherals.GPIO34, input);
    let ldr_pin = Input::new(peripherals.GPIO35, input);
    let mq135_pin = Input::new(peripherals.GPIO32, input);

    let sensors = tasks::Sensors {
        humidity: IndexedSensor::new(Dht11Sensor::new(dht_pin, embassy_time::Delay)),
        barometer: IndexedSensor::new(skywatch_core::sensors::Bmp280Sensor::with_sea_level(
            barometer,
            station.sampling.sea_level_hpa,
        )),
        darkness: IndexedSensor::new(DigitalSensor::darkness(ldr_pin)),
        rain: IndexedSensor::new(DigitalSensor::rain(rain_pin)),
        poor_air: IndexedSensor::new(DigitalSensor::poor_air(mq135_pin)),
    };

    stack.wait_config_up().await;
    info!("Network up; starting the polling loop");

    spawner
        .spawn(tasks::sampler(sensors, station.sampling.interval_seconds))
        .ok();
    spawner.spawn(tasks::display_cycle(lcd)).ok();
    spawner.spawn(tasks::notify(stack)).ok();

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
