//! Bounded command queue between the receiver and the signal manager.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::signal::SignalState;

/// Commands the queue holds before the drop-newest policy kicks in.
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// Single-producer single-consumer FIFO of target states.
///
/// Both ends are non-blocking: the producer drops the newest command on a
/// full queue (the remote sender retransmits), and the consumer falls through
/// to its timeout check on an empty one, so reversion is never starved by
/// command silence.
pub struct CommandQueue<M: RawMutex> {
    channel: Channel<M, SignalState, COMMAND_QUEUE_DEPTH>,
}

impl<M: RawMutex> CommandQueue<M> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueues a command in arrival order.
    ///
    /// On a full queue the offered command is dropped, returned as the error
    /// and the queued entries stay untouched.
    pub fn offer(&self, target: SignalState) -> Result<(), SignalState> {
        self.channel.try_send(target).map_err(|e| match e {
            TrySendError::Full(target) => target,
        })
    }

    /// Takes the oldest pending command without blocking.
    pub fn try_take(&self) -> Option<SignalState> {
        self.channel.try_receive().ok()
    }
}
