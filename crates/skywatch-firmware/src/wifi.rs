//! Wi-Fi bring-up and reconnect loop

use embassy_net::Runner;
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    ClientConfiguration, Configuration, WifiController, WifiDevice, WifiEvent, WifiState,
};
use log::{info, warn};

use crate::secrets;

/// Keeps the station associated: (re)configures the controller, connects,
/// and retries after every disconnect.
#[embassy_executor::task]
pub async fn connection(mut controller: WifiController<'static>) {
    loop {
        if esp_radio::wifi::wifi_state() == WifiState::StaConnected {
            // Already associated; block until the link drops.
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("Wi-Fi disconnected");
            Timer::after(Duration::from_secs(5)).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = Configuration::Client(ClientConfiguration {
                ssid: secrets::WIFI_SSID.into(),
                password: secrets::WIFI_PASSWORD.into(),
                ..Default::default()
            });
            controller
                .set_configuration(&client_config)
                .expect("invalid Wi-Fi configuration");
            controller.start_async().await.expect("Wi-Fi start failed");
        }

        info!("Connecting to Wi-Fi...");
        match controller.connect_async().await {
            Ok(()) => info!("Connected to Wi-Fi"),
            Err(e) => {
                warn!("Wi-Fi connect failed: {e:?}");
                Timer::after(Duration::from_secs(5)).await;
            }
        }
    }
}

/// Drives the network stack.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}
