#![no_std]
//! Signal state coordination core for the trackguard locomotive controller.
//!
//! Owns the canonical three-aspect signal state, the fail-safe revert timer
//! and the bounded command queue between the radio receiver and the signal
//! manager. Everything here is hardware-independent: the clock is passed in
//! as `embassy_time::Instant` values and the lamp head is reached through the
//! [`SignalLamps`] trait, so the whole crate builds and tests on the host.

mod command;
mod controller;
mod distance;
mod queue;
mod signal;

pub use command::decode;
pub use controller::SignalController;
pub use distance::{obstacle_detected, DistanceSample};
pub use queue::{CommandQueue, COMMAND_QUEUE_DEPTH};
pub use signal::{SignalLamps, SignalState};
