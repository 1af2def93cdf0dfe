//! Signal state management
//!
//! Owns the canonical signal aspect and the lamp head. Each cycle drains at
//! most one queued command, then evaluates the fail-safe revert deadline
//! against whatever state the command left behind, all under one lock so no
//! reader ever observes the aspect and its timer mid-update.
//!
//! # Fail-safe
//! Command silence is the dangerous case: an armed deadline forces the
//! aspect back to Red regardless of link health. A cycle skipped on lock
//! contention only delays that by one period.

use crate::system::command;
use crate::system::resources::SignalLampResources;
use crate::system::state::{self, LOCK_TIMEOUT};
use defmt::{info, warn};
use embassy_rp::gpio::{Level, Output};
use embassy_time::{with_timeout, Duration, Instant, Timer};
use trackguard_core::{SignalLamps, SignalState};

/// Cycle period for command draining and the timeout check
const MANAGE_INTERVAL: Duration = Duration::from_millis(50);

/// Discrete three-lamp signal head; exactly one output is ever high
struct LampHead {
    red: Output<'static>,
    yellow: Output<'static>,
    green: Output<'static>,
}

impl LampHead {
    /// Builds the head already showing Red, matching the controller's
    /// initial aspect before the first cycle runs
    fn new(r: SignalLampResources) -> Self {
        Self {
            red: Output::new(r.red_pin, Level::High),
            yellow: Output::new(r.yellow_pin, Level::Low),
            green: Output::new(r.green_pin, Level::Low),
        }
    }
}

impl SignalLamps for LampHead {
    fn set(&mut self, state: SignalState) {
        self.red
            .set_level(Level::from(state == SignalState::Red));
        self.yellow
            .set_level(Level::from(state == SignalState::Yellow));
        self.green
            .set_level(Level::from(state == SignalState::Green));
    }
}

/// Signal manager task, the single writer of the canonical aspect
#[embassy_executor::task]
pub async fn signal_manage(r: SignalLampResources) {
    let mut lamps = LampHead::new(r);
    info!("signal manager started, aspect Red");

    loop {
        match with_timeout(LOCK_TIMEOUT, state::SIGNAL.lock()).await {
            Ok(mut ctl) => {
                // Drain at most one command, then check the deadline against
                // the (possibly just re-armed) state/timer pair.
                if let Some(target) = command::try_take() {
                    let previous = ctl.state();
                    if ctl.apply(target, Instant::now(), &mut lamps) {
                        info!("aspect {} -> {}", previous, target);
                    }
                }
                if ctl.poll_revert(Instant::now(), &mut lamps) {
                    warn!("command silence, reverting to Red");
                }
            }
            // Contended cycle; the deadline is re-evaluated next period
            Err(_) => warn!("signal cell contended, skipping cycle"),
        }

        Timer::after(MANAGE_INTERVAL).await;
    }
}
