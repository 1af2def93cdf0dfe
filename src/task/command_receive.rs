//! Inbound command reception
//!
//! Polls the radio modem for CR/LF-terminated command tokens, decodes them
//! against the fixed vocabulary and queues the result for the signal manager.
//!
//! # Link Operation
//! - The modem presents received packets as a transparent 9600 baud stream
//! - Reads are bounded by the poll period; silence is not an error
//! - Garbled or oversized frames are discarded up to the next terminator
//!
//! # Backpressure
//! - A full queue drops the newest command; the remote sender retransmits,
//!   so no retry logic lives on this side of the link

use crate::system::command;
use crate::system::resources::{Irqs, RadioLinkResources};
use defmt::{info, warn};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::{with_timeout, Duration};
use heapless::Vec;
use trackguard_core::decode;

/// Poll period bounding each link read
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Longest accepted command token
const MAX_TOKEN_LEN: usize = 16;

/// Modem serial speed (bps)
const LINK_BAUD_RATE: u32 = 9600;

/// Command reception task
#[embassy_executor::task]
pub async fn command_receive(r: RadioLinkResources) {
    let mut config = UartConfig::default();
    config.baudrate = LINK_BAUD_RATE;
    let mut uart = Uart::new(
        r.uart, r.tx_pin, r.rx_pin, Irqs, r.tx_dma, r.rx_dma, config,
    );

    let mut token: Vec<u8, MAX_TOKEN_LEN> = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match with_timeout(POLL_INTERVAL, uart.read(&mut byte)).await {
            // No traffic this cycle
            Err(_) => continue,
            Ok(Err(e)) => {
                warn!("link read error: {}, discarding frame", e);
                token.clear();
            }
            Ok(Ok(())) => match byte[0] {
                b'\r' | b'\n' => {
                    if !token.is_empty() {
                        handle_token(&token);
                        token.clear();
                    }
                }
                b => {
                    if token.push(b).is_err() {
                        // Oversized frame cannot be a command; resync on the
                        // next terminator
                        warn!("oversized frame on link, discarding");
                        token.clear();
                    }
                }
            },
        }
    }
}

/// Decodes one complete token and queues the command it names
fn handle_token(token: &[u8]) {
    match decode(token) {
        Some(target) => {
            if command::enqueue(target) {
                info!("command received: {}", target);
            } else {
                warn!("command queue full, dropping {}", target);
            }
        }
        None => info!("unrecognized token on link, ignoring"),
    }
}
