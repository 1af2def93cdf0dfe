//! Inbound command vocabulary.
//!
//! The radio link delivers opaque ASCII tokens; this table maps the fixed
//! vocabulary onto target signal states. Anything else is not a command and
//! produces nothing for the queue.

use crate::signal::SignalState;

/// Decodes one received token into a target state.
///
/// Unrecognized tokens return `None`; the receiver drops those without
/// queueing anything.
pub fn decode(token: &[u8]) -> Option<SignalState> {
    match token {
        b"LED2" => Some(SignalState::Yellow),
        b"LED3" => Some(SignalState::Green),
        b"LED1" | b"RED" => Some(SignalState::Red),
        _ => None,
    }
}
