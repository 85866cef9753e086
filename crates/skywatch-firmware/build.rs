//! Exports station settings from a `.env` file into compile-time env vars.

fn main() {
    println!("cargo:rerun-if-changed=.env");

    if dotenvy::dotenv().is_err() {
        // No .env present; the firmware builds with empty settings.
        return;
    }

    for key in [
        "SKYWATCH_WIFI_SSID",
        "SKYWATCH_WIFI_PASSWORD",
        "SKYWATCH_BOT_TOKEN",
        "SKYWATCH_CHAT_ID",
    ] {
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
