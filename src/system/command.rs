//! Command Queue Front
//!
//! The bounded FIFO carrying decoded target-state commands from the radio
//! receiver to the signal manager. Single producer, single consumer, both
//! ends non-blocking.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use trackguard_core::{CommandQueue, SignalState};

/// Pending target-state commands, receiver -> signal manager
static COMMANDS: CommandQueue<CriticalSectionRawMutex> = CommandQueue::new();

/// Offers a decoded command
///
/// On a full queue the newest command is dropped and `false` returned; the
/// remote sender is expected to retransmit.
pub fn enqueue(target: SignalState) -> bool {
    COMMANDS.offer(target).is_ok()
}

/// Takes the oldest pending command without blocking
pub fn try_take() -> Option<SignalState> {
    COMMANDS.try_take()
}
