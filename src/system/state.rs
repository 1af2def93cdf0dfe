//! Shared Controller State
//!
//! The two cells the activities coordinate through:
//! - the signal controller (canonical aspect plus revert deadline, guarded
//!   as one unit so the armed-iff-non-Red invariant survives readers)
//! - the latest proximity sample for the operator display
//!
//! # Access Pattern
//! Every acquisition goes through a short bounded wait and skips the cycle's
//! operation on contention. A stale display value is acceptable; an activity
//! stalled behind another's lock is not.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{with_timeout, Duration};
use trackguard_core::{DistanceSample, SignalController, SignalState};

/// Longest any activity waits on a shared cell before skipping its cycle
pub const LOCK_TIMEOUT: Duration = Duration::from_millis(20);

/// How long a non-Red aspect survives without a fresh command
pub const REVERT_TIMEOUT: Duration = Duration::from_secs(10);

/// Canonical signal state and revert deadline
///
/// Written only by the signal manager; the display task reads the aspect.
pub static SIGNAL: Mutex<CriticalSectionRawMutex, SignalController> =
    Mutex::new(SignalController::new(REVERT_TIMEOUT));

/// Latest proximity reading; the sentinel until the sensor produces one
pub static DISTANCE: Mutex<CriticalSectionRawMutex, DistanceSample> = Mutex::new(None);

/// Publishes a distance sample; returns false if the cell stayed contended
pub async fn publish_distance(sample: DistanceSample) -> bool {
    match with_timeout(LOCK_TIMEOUT, DISTANCE.lock()).await {
        Ok(mut cell) => {
            *cell = sample;
            true
        }
        Err(_) => false,
    }
}

/// Reads the latest distance sample; `None` if the cell stayed contended
pub async fn read_distance() -> Option<DistanceSample> {
    match with_timeout(LOCK_TIMEOUT, DISTANCE.lock()).await {
        Ok(cell) => Some(*cell),
        Err(_) => None,
    }
}

/// Reads the canonical aspect; `None` if the cell stayed contended
pub async fn read_signal() -> Option<SignalState> {
    match with_timeout(LOCK_TIMEOUT, SIGNAL.lock()).await {
        Ok(ctl) => Some(ctl.state()),
        Err(_) => None,
    }
}
