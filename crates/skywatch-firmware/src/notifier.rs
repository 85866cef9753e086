//! Periodic report forwarding over the message API
//!
//! Sends the formatted report body to the Telegram Bot API as a form-encoded
//! POST. Plain HTTP to the configured endpoint; TLS termination is outside
//! this firmware (a local relay or test endpoint), matching the station's
//! "forward and forget" role. Errors are logged and the report is dropped;
//! the next interval retries with fresh data.

use embassy_net::Stack;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_time::Duration;
use embedded_io_async::Write as _;
use heapless::String;
use log::{info, warn};
use skywatch_core::config::NotifyConfig;

const API_HOST: &str = "api.telegram.org";
const API_PORT: u16 = 80;

#[derive(Debug)]
pub enum NotifyError {
    DnsLookup,
    Connect,
    Io,
    RequestTooLarge,
}

/// Sends one report body. One TCP connection per report; the response is not
/// parsed beyond letting the socket flush.
pub async fn send_report(
    stack: Stack<'static>,
    notify: &NotifyConfig<'_>,
    body: &str,
) -> Result<(), NotifyError> {
    let request = build_request(notify, body).ok_or(NotifyError::RequestTooLarge)?;

    let address = *stack
        .dns_query(API_HOST, DnsQueryType::A)
        .await
        .map_err(|_| NotifyError::DnsLookup)?
        .first()
        .ok_or(NotifyError::DnsLookup)?;

    let mut rx_buffer = [0u8; 1024];
    let mut tx_buffer = [0u8; 1024];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(10)));

    socket
        .connect((address, API_PORT))
        .await
        .map_err(|_| NotifyError::Connect)?;

    socket
        .write_all(request.as_bytes())
        .await
        .map_err(|_| NotifyError::Io)?;
    socket.flush().await.map_err(|_| NotifyError::Io)?;
    socket.close();

    info!("Report forwarded ({} bytes)", request.len());
    Ok(())
}

/// Builds the full HTTP request. Returns `None` if the encoded report does
/// not fit the fixed buffers.
fn build_request(notify: &NotifyConfig<'_>, body: &str) -> Option<String<1536>> {
    use core::fmt::Write as _;

    let mut form: String<1024> = String::new();
    form.push_str("chat_id=").ok()?;
    form.push_str(notify.chat_id).ok()?;
    form.push_str("&text=").ok()?;
    percent_encode_into(&mut form, body)?;

    let mut request: String<1536> = String::new();
    write!(
        request,
        "POST /bot{}/sendMessage HTTP/1.1\r\n\
         Host: {}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        notify.bot_token,
        API_HOST,
        form.len(),
        form,
    )
    .ok()?;
    Some(request)
}

/// Minimal application/x-www-form-urlencoded escaping.
fn percent_encode_into<const N: usize>(out: &mut String<N>, input: &str) -> Option<()> {
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char).ok()?;
            }
            b' ' => out.push('+').ok()?,
            _ => {
                const HEX: &[u8; 16] = b"0123456789ABCDEF";
                out.push('%').ok()?;
                out.push(HEX[(byte >> 4) as usize] as char).ok()?;
                out.push(HEX[(byte & 0x0F) as usize] as char).ok()?;
            }
        }
    }
    Some(())
}

/// Logs instead of failing the polling loop when forwarding goes wrong.
pub async fn try_send_report(stack: Stack<'static>, notify: &NotifyConfig<'_>, body: &str) {
    if let Err(e) = send_report(stack, notify, body).await {
        warn!("Report forwarding failed: {e:?}");
    }
}
